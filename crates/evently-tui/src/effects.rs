//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer never performs
//! I/O itself.
//!
//! Cancellation is decided by the reducer (`UiEffect::CancelTask`) and
//! executed by the runtime calling `cancel()` on the token.

use std::path::PathBuf;
use std::time::Duration;

use evently_core::api::MultipartForm;
use evently_core::routes::Route;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    Login {
        task: TaskId,
        email: String,
        password: String,
    },

    SignUp {
        task: TaskId,
        form: MultipartForm,
    },

    Logout {
        task: TaskId,
    },

    /// Fetch the full event list (never cached).
    FetchEvents {
        task: TaskId,
    },

    LoadEvent {
        task: TaskId,
        id: String,
    },

    CreateEvent {
        task: TaskId,
        form: MultipartForm,
    },

    /// Read a cover image from disk.
    LoadCoverImage {
        task: TaskId,
        path: PathBuf,
    },

    /// Start a cancellable timer that posts `RedirectDue` after `delay`.
    ScheduleRedirect {
        task: TaskId,
        to: Route,
        delay: Duration,
    },

    /// Cancel an in-progress task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
