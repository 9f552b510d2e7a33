//! Composer reducer.
//!
//! Free-text fields and the online toggle commit to the draft on every
//! input. Date/time goes through the picker's staging buffer. The category
//! commits on select.

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use evently_core::api::{ApiError, ApiErrorKind, CreatedEvent, FilePart};
use evently_core::events::{COVER_IMAGE_FIELD, EventType};
use evently_core::routes::Route;

use super::state::{ComposerFocus, ComposerState, FeedbackState};
use crate::common::TaskSeq;
use crate::common::pointer::hit;
use crate::effects::UiEffect;
use crate::overlays::{Picker, PickerKind, PickerTransition, PickerUpdate};
use crate::router::NavRequest;

pub const SUCCESS_MESSAGE: &str = "Event created successfully";
pub const SERVER_FALLBACK_MESSAGE: &str = "An error occurred while creating the event.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Semantic composer inputs, independent of how they were produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerInput {
    SetName(String),
    SetAddress(String),
    ToggleOnlineSync,
    /// Trigger press: opens the picker, or closes it if already open.
    TogglePicker(PickerKind),
    SetPendingDate(String),
    SetPendingTime(String),
    ConfirmDateTime,
    SelectEventType(EventType),
    /// Closes the open picker without committing.
    DismissPicker,
    /// Pointer-down anywhere on screen.
    PointerDown { column: u16, row: u16 },
    SetCoverPath(String),
    LoadCoverImage,
    Submit,
    DismissFeedback,
}

/// Applies one input. Returns effects for the runtime.
pub fn apply(state: &mut ComposerState, input: ComposerInput, seq: &mut TaskSeq) -> Vec<UiEffect> {
    match input {
        ComposerInput::SetName(name) => {
            state.name.set_text(&name);
            state.draft.name = name;
            vec![]
        }
        ComposerInput::SetAddress(address) => {
            state.address.set_text(&address);
            state.draft.address = address;
            vec![]
        }
        ComposerInput::ToggleOnlineSync => {
            state.draft.online_sync = !state.draft.online_sync;
            vec![]
        }
        ComposerInput::TogglePicker(kind) => {
            toggle_picker(state, kind);
            vec![]
        }
        ComposerInput::SetPendingDate(date) => {
            if let Some(Picker::DateTime(picker)) = &mut state.picker {
                picker.set_date(&date);
            }
            vec![]
        }
        ComposerInput::SetPendingTime(time) => {
            if let Some(Picker::DateTime(picker)) = &mut state.picker {
                picker.set_time(&time);
            }
            vec![]
        }
        ComposerInput::ConfirmDateTime => {
            if let Some(Picker::DateTime(picker)) = &mut state.picker {
                let update = picker.confirm();
                apply_picker_update(state, update);
            }
            vec![]
        }
        ComposerInput::SelectEventType(event_type) => {
            if let Some(Picker::EventType(picker)) = &state.picker {
                let update = picker.select(event_type);
                apply_picker_update(state, update);
            }
            vec![]
        }
        ComposerInput::DismissPicker => {
            state.picker = None;
            vec![]
        }
        ComposerInput::PointerDown { column, row } => pointer_down(state, column, row, seq),
        ComposerInput::SetCoverPath(path) => {
            state.cover_path.set_text(&path);
            vec![]
        }
        ComposerInput::LoadCoverImage => load_cover_image(state, seq),
        ComposerInput::Submit => submit(state, seq),
        ComposerInput::DismissFeedback => {
            state.feedback = FeedbackState::None;
            vec![]
        }
    }
}

/// Opens `kind`, closing any other picker (and discarding its staged edits).
/// Pressing the trigger of the open picker closes it.
fn toggle_picker(state: &mut ComposerState, kind: PickerKind) {
    if state.picker_kind() == Some(kind) {
        state.picker = None;
    } else {
        state.picker = Some(Picker::open(kind, &state.draft));
    }
}

fn apply_picker_update(state: &mut ComposerState, update: PickerUpdate) {
    for mutation in update.mutations {
        mutation.apply(&mut state.draft);
    }
    if update.transition == PickerTransition::Close {
        state.picker = None;
    }
}

fn pointer_down(state: &mut ComposerState, column: u16, row: u16, seq: &mut TaskSeq) -> Vec<UiEffect> {
    if let Some(picker) = &mut state.picker {
        if picker.contains(column, row) {
            let update = picker.handle_click(column, row);
            apply_picker_update(state, update);
            return vec![];
        }
        // Outside the pop-out and its trigger: dismiss without committing.
        if !hit(state.layout.trigger(picker.kind()), column, row) {
            state.picker = None;
        }
    }

    match state.layout.row_at(column, row) {
        Some(focus) => {
            state.focus = focus;
            activate(state, focus, seq)
        }
        None => vec![],
    }
}

/// Presses the control on `focus`.
fn activate(state: &mut ComposerState, focus: ComposerFocus, seq: &mut TaskSeq) -> Vec<UiEffect> {
    match focus {
        ComposerFocus::Name | ComposerFocus::Address => vec![],
        ComposerFocus::DateTime => apply(state, ComposerInput::TogglePicker(PickerKind::DateTime), seq),
        ComposerFocus::EventType => {
            apply(state, ComposerInput::TogglePicker(PickerKind::EventType), seq)
        }
        ComposerFocus::OnlineSync => apply(state, ComposerInput::ToggleOnlineSync, seq),
        ComposerFocus::CoverImage => load_cover_image(state, seq),
        ComposerFocus::Submit => submit(state, seq),
    }
}

fn load_cover_image(state: &mut ComposerState, seq: &mut TaskSeq) -> Vec<UiEffect> {
    let path = state.cover_path.text().trim().to_string();
    if path.is_empty() {
        state.draft.cover_image = None;
        return vec![];
    }
    let task = seq.next_id();
    state.cover_task = Some(task);
    vec![UiEffect::LoadCoverImage {
        task,
        path: PathBuf::from(path),
    }]
}

fn submit(state: &mut ComposerState, seq: &mut TaskSeq) -> Vec<UiEffect> {
    if state.is_submitting() {
        tracing::debug!("submit ignored: already in flight");
        return vec![];
    }
    if state.submitted {
        tracing::debug!("submit ignored: event already created");
        return vec![];
    }
    if state.cover_task.is_some() {
        tracing::debug!("submit ignored: cover image still loading");
        return vec![];
    }
    let task = seq.next_id();
    state.submit_task = Some(task);
    vec![UiEffect::CreateEvent {
        task,
        form: state.draft.to_form(),
    }]
}

/// Handles the `createEvent` outcome.
///
/// Success closes the draft to further submits and schedules the redirect
/// to the listing. Failure keeps the draft exactly as entered.
pub fn handle_submit_result(
    state: &mut ComposerState,
    result: Result<CreatedEvent, ApiError>,
    seq: &mut TaskSeq,
    redirect_delay: Duration,
) -> Vec<UiEffect> {
    state.submit_task = None;
    match result {
        Ok(_) => {
            state.submitted = true;
            state.feedback = FeedbackState::success(SUCCESS_MESSAGE);
            let task = seq.next_id();
            state.pending_redirect = Some(task);
            vec![UiEffect::ScheduleRedirect {
                task,
                to: Route::SearchEvents,
                delay: redirect_delay,
            }]
        }
        Err(e) => {
            state.feedback = FeedbackState::error(failure_message(&e));
            vec![]
        }
    }
}

/// User-facing message for a failed submission.
pub fn failure_message(error: &ApiError) -> String {
    if let Some(message) = error.server_message() {
        return message.to_string();
    }
    match error.kind() {
        ApiErrorKind::Server => SERVER_FALLBACK_MESSAGE.to_string(),
        ApiErrorKind::Network | ApiErrorKind::Unknown => UNEXPECTED_MESSAGE.to_string(),
    }
}

/// Stores the loaded cover, replacing any previous one.
pub fn handle_cover_loaded(state: &mut ComposerState, result: Result<FilePart, String>) {
    state.cover_task = None;
    match result {
        Ok(mut part) => {
            part.field = COVER_IMAGE_FIELD.to_string();
            state.draft.cover_image = Some(part);
        }
        Err(message) => {
            state.feedback = FeedbackState::error(message);
        }
    }
}

/// Maps a key press to composer inputs.
pub fn handle_key(
    state: &mut ComposerState,
    key: KeyEvent,
    seq: &mut TaskSeq,
) -> (Vec<UiEffect>, Option<NavRequest>) {
    if matches!(key.kind, KeyEventKind::Release) {
        return (vec![], None);
    }

    // An open picker takes all keys.
    if let Some(picker) = &mut state.picker {
        let update = picker.handle_key(key);
        apply_picker_update(state, update);
        return (vec![], None);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => (submit(state, seq), None),
        KeyCode::Esc => {
            if state.feedback.is_none() {
                (vec![], Some(NavRequest::Back))
            } else {
                state.feedback = FeedbackState::None;
                (vec![], None)
            }
        }
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            (vec![], None)
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.prev();
            (vec![], None)
        }
        KeyCode::Enter => {
            if matches!(state.focus, ComposerFocus::Name | ComposerFocus::Address) {
                state.focus = state.focus.next();
                return (vec![], None);
            }
            (activate(state, state.focus, seq), None)
        }
        KeyCode::Char(' ')
            if matches!(
                state.focus,
                ComposerFocus::DateTime | ComposerFocus::EventType | ComposerFocus::OnlineSync
            ) =>
        {
            (activate(state, state.focus, seq), None)
        }
        _ => {
            edit_focused(state, key);
            (vec![], None)
        }
    }
}

fn edit_focused(state: &mut ComposerState, key: KeyEvent) {
    match state.focus {
        ComposerFocus::Name => {
            if state.name.input(key) {
                state.draft.name = state.name.text().to_string();
            }
        }
        ComposerFocus::Address => {
            if state.address.input(key) {
                state.draft.address = state.address.text().to_string();
            }
        }
        ComposerFocus::CoverImage => {
            state.cover_path.input(key);
        }
        _ => {}
    }
}
