use std::cell::Cell;

use evently_core::events::EventDraft;
use ratatui::layout::Rect;

use crate::common::pointer::hit;
use crate::common::{ListenerId, PointerSubscription, TaskId, TextField};
use crate::overlays::{Picker, PickerKind};

/// Result banner shown above the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FeedbackState {
    #[default]
    None,
    Error {
        title: String,
        message: String,
    },
    Success {
        title: String,
        message: String,
    },
}

impl FeedbackState {
    pub fn error(message: impl Into<String>) -> Self {
        FeedbackState::Error {
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        FeedbackState::Success {
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, FeedbackState::None)
    }
}

/// Focusable rows, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerFocus {
    Name,
    Address,
    DateTime,
    EventType,
    OnlineSync,
    CoverImage,
    Submit,
}

impl ComposerFocus {
    const ORDER: [ComposerFocus; 7] = [
        ComposerFocus::Name,
        ComposerFocus::Address,
        ComposerFocus::DateTime,
        ComposerFocus::EventType,
        ComposerFocus::OnlineSync,
        ComposerFocus::CoverImage,
        ComposerFocus::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// The picker this row triggers, if any.
    pub fn picker(self) -> Option<PickerKind> {
        match self {
            ComposerFocus::DateTime => Some(PickerKind::DateTime),
            ComposerFocus::EventType => Some(PickerKind::EventType),
            _ => None,
        }
    }
}

/// Row rectangles as last rendered, used for hit-testing.
#[derive(Debug, Default)]
pub struct ComposerLayout {
    rows: [Cell<Rect>; 7],
}

impl ComposerLayout {
    pub fn set(&self, focus: ComposerFocus, rect: Rect) {
        self.rows[focus.index()].set(rect);
    }

    pub fn get(&self, focus: ComposerFocus) -> Rect {
        self.rows[focus.index()].get()
    }

    /// Trigger button of a picker.
    pub fn trigger(&self, kind: PickerKind) -> Rect {
        match kind {
            PickerKind::DateTime => self.get(ComposerFocus::DateTime),
            PickerKind::EventType => self.get(ComposerFocus::EventType),
        }
    }

    pub fn row_at(&self, column: u16, row: u16) -> Option<ComposerFocus> {
        ComposerFocus::ORDER
            .into_iter()
            .find(|f| hit(self.get(*f), column, row))
    }
}

/// One event creation session.
///
/// Dropping the state releases its pointer listener.
#[derive(Debug)]
pub struct ComposerState {
    pub draft: EventDraft,
    pub name: TextField,
    pub address: TextField,
    /// Path typed for the cover image (the blob itself lives in the draft)
    pub cover_path: TextField,
    pub focus: ComposerFocus,
    pub picker: Option<Picker>,
    pub feedback: FeedbackState,
    /// In-flight `createEvent` submission
    pub submit_task: Option<TaskId>,
    pub cover_task: Option<TaskId>,
    /// Post-success redirect timer
    pub pending_redirect: Option<TaskId>,
    /// Set once the server accepted the draft; later submits are ignored.
    pub submitted: bool,
    pub layout: ComposerLayout,
    pointer: PointerSubscription,
}

impl ComposerState {
    pub fn new(pointer: PointerSubscription) -> Self {
        Self {
            draft: EventDraft::default(),
            name: TextField::new(),
            address: TextField::new(),
            cover_path: TextField::new(),
            focus: ComposerFocus::Name,
            picker: None,
            feedback: FeedbackState::None,
            submit_task: None,
            cover_task: None,
            pending_redirect: None,
            submitted: false,
            layout: ComposerLayout::default(),
            pointer,
        }
    }

    pub fn listener(&self) -> ListenerId {
        self.pointer.id()
    }

    pub fn picker_kind(&self) -> Option<PickerKind> {
        self.picker.as_ref().map(Picker::kind)
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_task.is_some()
    }

    /// Whether `id` is a task this composer launched and still awaits.
    pub fn awaits(&self, id: TaskId) -> bool {
        [self.submit_task, self.cover_task, self.pending_redirect].contains(&Some(id))
    }
}
