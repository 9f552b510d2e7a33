//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, frame ticks, task
//! lifecycle notifications and async results posted to the inbox.

use evently_core::api::{ApiError, CreatedEvent, Event, FilePart};
use evently_core::routes::Route;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (drives spinner animation and rendering cadence).
    Tick,
    /// Frame size for the upcoming render.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    LoginFinished(Result<(), ApiError>),
    SignUpFinished(Result<(), ApiError>),
    LogoutFinished(Result<(), ApiError>),
    EventsLoaded(Result<Vec<Event>, ApiError>),
    EventLoaded {
        id: String,
        result: Result<Event, ApiError>,
    },
    EventCreated(Result<CreatedEvent, ApiError>),
    CoverImageLoaded(Result<FilePart, String>),
    /// The post-submit delay elapsed.
    RedirectDue { task: TaskId, to: Route },
    /// The redirect timer was cancelled before it fired.
    RedirectCancelled { task: TaskId },
}
