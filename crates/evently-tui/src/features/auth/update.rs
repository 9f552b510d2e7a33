//! Login and sign-up reducers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use evently_core::api::{ApiError, MultipartForm};
use evently_core::routes::Route;

use super::state::{AuthFocus, AuthMode, AuthState};
use crate::common::TaskSeq;
use crate::effects::UiEffect;
use crate::router::NavRequest;

/// Shown on the login view after a successful sign-up.
pub const SIGNED_UP_NOTICE: &str = "Account created. Log in to continue.";

pub fn handle_key(
    state: &mut AuthState,
    key: KeyEvent,
    seq: &mut TaskSeq,
) -> (Vec<UiEffect>, Option<NavRequest>) {
    if matches!(key.kind, KeyEventKind::Release) {
        return (vec![], None);
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('s') if ctrl => (submit(state, seq), None),
        KeyCode::Tab | KeyCode::Down => {
            state.move_focus(true);
            (vec![], None)
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.move_focus(false);
            (vec![], None)
        }
        KeyCode::Esc => {
            state.error = None;
            state.notice = None;
            (vec![], None)
        }
        KeyCode::Enter => match state.focus {
            AuthFocus::Switch => (vec![], Some(NavRequest::push(&switch_target(state.mode)))),
            AuthFocus::Submit | AuthFocus::Password => (submit(state, seq), None),
            AuthFocus::Name | AuthFocus::Email => {
                state.move_focus(true);
                (vec![], None)
            }
        },
        _ => {
            let focus = state.focus;
            if let Some(field) = state.field_mut(focus)
                && field.input(key)
            {
                state.error = None;
            }
            (vec![], None)
        }
    }
}

fn switch_target(mode: AuthMode) -> Route {
    match mode {
        AuthMode::Login => Route::SignUp,
        AuthMode::SignUp => Route::Login,
    }
}

fn submit(state: &mut AuthState, seq: &mut TaskSeq) -> Vec<UiEffect> {
    if state.is_busy() {
        return vec![];
    }
    if let Err(message) = validate(state) {
        state.error = Some(message);
        return vec![];
    }

    state.error = None;
    let task = seq.next_id();
    state.task = Some(task);
    let email = state.email.text().trim().to_string();
    let password = state.password.text().to_string();
    match state.mode {
        AuthMode::Login => vec![UiEffect::Login {
            task,
            email,
            password,
        }],
        AuthMode::SignUp => vec![UiEffect::SignUp {
            task,
            form: signup_form(state.name.text().trim(), &email, &password),
        }],
    }
}

/// Multipart body for the sign-up endpoint.
pub fn signup_form(name: &str, email: &str, password: &str) -> MultipartForm {
    MultipartForm::new()
        .text("name", name)
        .text("email", email)
        .text("password", password)
}

fn validate(state: &AuthState) -> Result<(), String> {
    if state.mode == AuthMode::SignUp && state.name.text().trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if state.email.text().trim().is_empty() || state.password.is_empty() {
        return Err("Email and password are required".to_string());
    }
    Ok(())
}

/// Handles the login outcome. Success goes to the home view.
pub fn handle_login_result(state: &mut AuthState, result: Result<(), ApiError>) -> Option<NavRequest> {
    state.task = None;
    match result {
        Ok(()) => Some(NavRequest::push(&Route::Home)),
        Err(e) => {
            state.password.set_text("");
            state.error = Some(auth_error_message(&e));
            None
        }
    }
}

/// Handles the sign-up outcome. Success returns to login without a session.
pub fn handle_signup_result(
    state: &mut AuthState,
    result: Result<(), ApiError>,
) -> Option<NavRequest> {
    state.task = None;
    match result {
        Ok(()) => Some(NavRequest::replace(&Route::Login)),
        Err(e) => {
            state.error = Some(auth_error_message(&e));
            None
        }
    }
}

fn auth_error_message(error: &ApiError) -> String {
    error
        .server_message()
        .map_or_else(|| error.to_string(), str::to_string)
}
