use evently_core::events::EventDraft;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::state::{ComposerFocus, ComposerState, FeedbackState};
use crate::common::form::{ACCENT, banner_line, button_line, field_line, value_line};
use crate::common::truncate_start_with_ellipsis;
use crate::overlays::render_utils::{InputHint, render_hints};

/// Renders the composer into `area` and records row rectangles for
/// hit-testing. The open picker is drawn last, over the form.
pub fn render_composer(state: &ComposerState, frame: &mut Frame, area: Rect) {
    let mut y = area.y;
    let bottom = area.bottom().saturating_sub(1);

    if let Some(line) = feedback_line(&state.feedback) {
        frame.render_widget(Paragraph::new(line), Rect::new(area.x, y, area.width, 1));
        y = y.saturating_add(2);
    }

    for focus in [
        ComposerFocus::Name,
        ComposerFocus::Address,
        ComposerFocus::DateTime,
        ComposerFocus::EventType,
        ComposerFocus::OnlineSync,
        ComposerFocus::CoverImage,
        ComposerFocus::Submit,
    ] {
        if y >= bottom {
            state.layout.set(focus, Rect::default());
            continue;
        }
        let row = Rect::new(area.x, y, area.width, 1);
        state.layout.set(focus, row);
        frame.render_widget(Paragraph::new(row_line(state, focus, area.width)), row);
        y = y.saturating_add(2);
    }

    render_hints(frame, area, &hints(state), ACCENT);

    if let Some(picker) = &state.picker {
        picker.render(frame, state.layout.trigger(picker.kind()), area);
    }
}

fn row_line(state: &ComposerState, focus: ComposerFocus, width: u16) -> Line<'static> {
    let focused = state.focus == focus;
    let draft = &state.draft;
    match focus {
        ComposerFocus::Name => field_line("Name", &state.name, "Event name", focused, false),
        ComposerFocus::Address => {
            field_line("Address", &state.address, "Where is it?", focused, false)
        }
        ComposerFocus::DateTime => match date_time_label(draft) {
            Some(label) => value_line("Date & Time", &label, focused, false),
            None => value_line("Date & Time", "Pick date & time ▾", focused, true),
        },
        ComposerFocus::EventType => match draft.event_type {
            Some(event_type) => value_line("Type", event_type.as_str(), focused, false),
            None => value_line("Type", "Select event type ▾", focused, true),
        },
        ComposerFocus::OnlineSync => {
            let mark = if draft.online_sync { "[x]" } else { "[ ]" };
            value_line("Online sync", mark, focused, false)
        }
        ComposerFocus::CoverImage => {
            if focused || draft.cover_image.is_none() {
                return field_line("Cover image", &state.cover_path, "Path to image", focused, false);
            }
            let loaded = draft
                .cover_image
                .as_ref()
                .map(|c| c.file_name.clone())
                .unwrap_or_default();
            let max = usize::from(width).saturating_sub(20).max(8);
            value_line("Cover image", &truncate_start_with_ellipsis(&loaded, max), false, false)
        }
        ComposerFocus::Submit => {
            let label = if state.is_submitting() {
                "Creating…"
            } else {
                "Create Event"
            };
            button_line(label, focused, !state.is_submitting())
        }
    }
}

fn date_time_label(draft: &EventDraft) -> Option<String> {
    match (draft.date.is_empty(), draft.time.is_empty()) {
        (true, true) => None,
        (false, true) => Some(draft.date.clone()),
        (true, false) => Some(draft.time.clone()),
        (false, false) => Some(format!("{} {}", draft.date, draft.time)),
    }
}

fn feedback_line(feedback: &FeedbackState) -> Option<Line<'static>> {
    match feedback {
        FeedbackState::None => None,
        FeedbackState::Error { title, message } => Some(banner_line(title, message, Color::Red)),
        FeedbackState::Success { title, message } => {
            Some(banner_line(title, message, Color::Green))
        }
    }
}

fn hints(state: &ComposerState) -> Vec<InputHint<'static>> {
    let mut hints = vec![
        InputHint::new("Tab", "next"),
        InputHint::new("Enter", "select"),
        InputHint::new("Ctrl+S", "create"),
    ];
    if state.focus == ComposerFocus::CoverImage {
        hints.push(InputHint::new("Enter", "load image"));
    }
    hints.push(InputHint::new("Esc", "back"));
    hints
}
