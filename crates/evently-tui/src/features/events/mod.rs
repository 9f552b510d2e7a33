//! Event listing and detail views.

mod detail;
mod list;

pub use detail::{DetailStatus, EventDetailState};
pub use list::EventListState;
