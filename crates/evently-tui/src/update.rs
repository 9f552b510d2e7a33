//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use evently_core::routes::{Route, guard};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::auth::{self, AuthMode, AuthState, SIGNED_UP_NOTICE};
use crate::features::composer::{self, ComposerInput, ComposerState};
use crate::features::events::{EventDetailState, EventListState};
use crate::features::pages::{AccountState, HomeState, LOGGED_OUT_NOTICE, Placeholder};
use crate::router::NavRequest;
use crate::state::{AppState, View};

/// Runs the guard for the initial route.
pub fn start(app: &mut AppState) -> Vec<UiEffect> {
    navigate(app, NavRequest::Replace(Route::Home.path()))
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.screen = (width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            if app.view.awaits(started.id) {
                app.tasks.state_mut(kind).on_started(&started);
                return vec![];
            }
            // The view that asked for it is gone.
            tracing::debug!(?kind, id = started.id.0, "task started for unmounted view");
            match started.cancel {
                Some(token) => vec![UiEffect::CancelTask {
                    kind,
                    token: Some(token),
                }],
                None => vec![],
            }
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let active = app.tasks.state_mut(kind).finish_if_active(completed.id);
            if !active || !app.view.awaits(completed.id) {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task result");
                return vec![];
            }
            update(app, *completed.result)
        }
        UiEvent::LoginFinished(result) => {
            let nav = match &mut app.view {
                View::Auth(state) => auth::handle_login_result(state, result),
                _ => None,
            };
            follow(app, nav)
        }
        UiEvent::SignUpFinished(result) => {
            let nav = match &mut app.view {
                View::Auth(state) => auth::handle_signup_result(state, result),
                _ => None,
            };
            if nav.is_some() {
                app.notice = Some(SIGNED_UP_NOTICE.to_string());
            }
            follow(app, nav)
        }
        UiEvent::LogoutFinished(result) => {
            let nav = match &mut app.view {
                View::Account(state) => Some(state.handle_logout_result(result)),
                _ => None,
            };
            if nav.is_some() {
                app.notice = Some(LOGGED_OUT_NOTICE.to_string());
            }
            follow(app, nav)
        }
        UiEvent::EventsLoaded(result) => {
            if let View::EventList(state) = &mut app.view {
                state.handle_loaded(result);
            }
            vec![]
        }
        UiEvent::EventLoaded { id, result } => {
            if let View::EventDetail(state) = &mut app.view {
                state.handle_loaded(&id, result);
            }
            vec![]
        }
        UiEvent::EventCreated(result) => match &mut app.view {
            View::Composer(state) => composer::handle_submit_result(
                state,
                result,
                &mut app.task_seq,
                app.redirect_delay,
            ),
            _ => vec![],
        },
        UiEvent::CoverImageLoaded(result) => {
            if let View::Composer(state) = &mut app.view {
                composer::handle_cover_loaded(state, result);
            }
            vec![]
        }
        UiEvent::RedirectDue { task, to } => {
            let due = match &mut app.view {
                View::Composer(state) if state.pending_redirect == Some(task) => {
                    state.pending_redirect = None;
                    true
                }
                _ => false,
            };
            if due {
                navigate(app, NavRequest::push(&to))
            } else {
                vec![]
            }
        }
        UiEvent::RedirectCancelled { task } => {
            if let View::Composer(state) = &mut app.view
                && state.pending_redirect == Some(task)
            {
                state.pending_redirect = None;
            }
            vec![]
        }
    }
}

fn follow(app: &mut AppState, nav: Option<NavRequest>) -> Vec<UiEffect> {
    nav.map(|nav| navigate(app, nav)).unwrap_or_default()
}

/// Performs a route transition.
///
/// The guard runs on every transition, including back. A guard redirect
/// always replaces the current history entry.
pub fn navigate(app: &mut AppState, request: NavRequest) -> Vec<UiEffect> {
    let (path, push) = match request {
        NavRequest::Push(path) => (path, true),
        NavRequest::Replace(path) => (path, false),
        NavRequest::Back => match app.router.back() {
            Some(route) => (route.path(), false),
            None => return vec![],
        },
    };

    let decision = guard(&path, app.session.as_ref());
    let route = decision.route().clone();
    if decision.is_redirect() {
        tracing::info!(requested = %path, to = %route, "navigation redirected");
        app.router.replace(route.clone());
    } else if push {
        app.router.push(route.clone());
    } else {
        app.router.replace(route.clone());
    }
    tracing::debug!(route = %route, depth = app.router.depth(), "navigated");

    let mut effects = unmount(app);
    effects.extend(mount(app, route));
    effects
}

/// Forgets every running task and cancels the cancellable ones.
fn unmount(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for kind in TaskKind::ALL {
        let state = app.tasks.state_mut(kind);
        if let Some(token) = state.cancel.take() {
            effects.push(UiEffect::CancelTask {
                kind,
                token: Some(token),
            });
        }
        state.clear();
    }
    effects
}

fn mount(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    let notice = app.notice.take();
    let mut effects = Vec::new();
    let view = match route {
        Route::Login => {
            let mut state = AuthState::new(AuthMode::Login);
            state.notice = notice;
            View::Auth(state)
        }
        Route::SignUp => View::Auth(AuthState::new(AuthMode::SignUp)),
        Route::Home => View::Home(HomeState::default()),
        Route::SearchEvents => {
            let (state, fetch) = EventListState::mount(&mut app.task_seq);
            effects.push(fetch);
            View::EventList(state)
        }
        Route::Event(id) => {
            let (state, load) = EventDetailState::mount(id, &mut app.task_seq);
            effects.extend(load);
            View::EventDetail(state)
        }
        Route::CreateEvent => View::Composer(ComposerState::new(app.pointer.subscribe())),
        Route::PersonalInfo => View::Placeholder(Placeholder::PersonalInfo),
        Route::MyEvents => View::Placeholder(Placeholder::MyEvents),
        Route::MyAccount => View::Account(AccountState::default()),
    };
    // Dropping the previous view releases its pointer listener.
    app.view = view;
    effects
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            let seq = &mut app.task_seq;
            match &mut app.view {
                View::Composer(state) if app.pointer.is_active(state.listener()) => {
                    composer::apply(
                        state,
                        ComposerInput::PointerDown {
                            column: mouse.column,
                            row: mouse.row,
                        },
                        seq,
                    )
                }
                _ => vec![],
            }
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'q'))
    {
        app.should_quit = true;
        return vec![UiEffect::Quit];
    }

    let seq = &mut app.task_seq;
    let (mut effects, nav) = match &mut app.view {
        View::Auth(state) => auth::handle_key(state, key, seq),
        View::Home(state) => (vec![], state.handle_key(key)),
        View::EventList(state) => state.handle_key(key, seq),
        View::EventDetail(state) => state.handle_key(key, seq),
        View::Composer(state) => composer::handle_key(state, key, seq),
        View::Placeholder(_) => (vec![], Placeholder::handle_key(key)),
        View::Account(state) => state.handle_key(key, seq),
    };
    effects.extend(follow(app, nav));
    effects
}
