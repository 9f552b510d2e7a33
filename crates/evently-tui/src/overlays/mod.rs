//! Pop-out pickers for the event composer.
//!
//! At most one picker is open at a time (`Option<Picker>`). A picker owns its
//! staging state and returns a `PickerUpdate`: whether it stays open plus the
//! draft mutations to apply. Pickers never write the draft directly.
//!
//! - `datetime_picker.rs`: staged date/time entry, committed on confirm
//! - `event_type_picker.rs`: category list, committed on select
//! - `render_utils.rs`: shared pop-out rendering

pub mod datetime_picker;
pub mod event_type_picker;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use datetime_picker::{DateTimeFocus, DateTimePickerState};
use evently_core::events::{EventDraft, EventType, PendingDateTime};
pub use event_type_picker::EventTypePickerState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::common::pointer;

/// Which picker is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    DateTime,
    EventType,
}

/// Draft changes a picker asks the composer to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMutation {
    CommitDateTime(PendingDateTime),
    SetEventType(EventType),
}

impl DraftMutation {
    pub fn apply(self, draft: &mut EventDraft) {
        match self {
            DraftMutation::CommitDateTime(pending) => draft.commit_date_time(&pending),
            DraftMutation::SetEventType(event_type) => draft.event_type = Some(event_type),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerTransition {
    Stay,
    Close,
}

/// Update returned by picker handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerUpdate {
    pub transition: PickerTransition,
    pub mutations: Vec<DraftMutation>,
}

impl PickerUpdate {
    pub fn stay() -> Self {
        Self {
            transition: PickerTransition::Stay,
            mutations: Vec::new(),
        }
    }

    pub fn close() -> Self {
        Self {
            transition: PickerTransition::Close,
            mutations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_mutation(mut self, mutation: DraftMutation) -> Self {
        self.mutations.push(mutation);
        self
    }
}

#[derive(Debug)]
pub enum Picker {
    DateTime(DateTimePickerState),
    EventType(EventTypePickerState),
}

impl Picker {
    /// Opens a picker of `kind` seeded from the committed draft.
    pub fn open(kind: PickerKind, draft: &EventDraft) -> Self {
        match kind {
            PickerKind::DateTime => Picker::DateTime(DateTimePickerState::open(draft)),
            PickerKind::EventType => Picker::EventType(EventTypePickerState::open(draft.event_type)),
        }
    }

    pub fn kind(&self) -> PickerKind {
        match self {
            Picker::DateTime(_) => PickerKind::DateTime,
            Picker::EventType(_) => PickerKind::EventType,
        }
    }

    /// Pop-out bounds as last rendered.
    pub fn area(&self) -> Rect {
        match self {
            Picker::DateTime(p) => p.area(),
            Picker::EventType(p) => p.area(),
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        pointer::hit(self.area(), column, row)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerUpdate {
        match self {
            Picker::DateTime(p) => p.handle_key(key),
            Picker::EventType(p) => p.handle_key(key),
        }
    }

    /// Handles a pointer-down inside the pop-out.
    pub fn handle_click(&mut self, column: u16, row: u16) -> PickerUpdate {
        match self {
            Picker::DateTime(p) => p.handle_click(column, row),
            Picker::EventType(p) => p.handle_click(column, row),
        }
    }

    pub fn render(&self, frame: &mut Frame, anchor: Rect, screen: Rect) {
        match self {
            Picker::DateTime(p) => p.render(frame, anchor, screen),
            Picker::EventType(p) => p.render(frame, anchor, screen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_seeds_from_draft() {
        let draft = EventDraft {
            date: "2024-01-02".into(),
            time: "08:30".into(),
            event_type: Some(EventType::Education),
            ..EventDraft::default()
        };

        let Picker::DateTime(dt) = Picker::open(PickerKind::DateTime, &draft) else {
            panic!("expected date/time picker");
        };
        assert_eq!(dt.pending, draft.pending_date_time());

        let picker = Picker::open(PickerKind::EventType, &draft);
        assert_eq!(picker.kind(), PickerKind::EventType);
        let Picker::EventType(types) = picker else {
            panic!("expected event type picker");
        };
        assert_eq!(types.selected_type(), Some(EventType::Education));
    }

    #[test]
    fn test_mutations_apply_to_draft() {
        let mut draft = EventDraft::default();
        DraftMutation::SetEventType(EventType::Social).apply(&mut draft);
        DraftMutation::CommitDateTime(PendingDateTime {
            date: "2024-06-05".into(),
            time: "10:00".into(),
        })
        .apply(&mut draft);
        assert_eq!(draft.event_type, Some(EventType::Social));
        assert_eq!(draft.date, "2024-06-05");
        assert_eq!(draft.time, "10:00");
    }

    #[test]
    fn test_unrendered_picker_contains_nothing() {
        let picker = Picker::open(PickerKind::EventType, &EventDraft::default());
        assert!(!picker.contains(0, 0));
    }
}
