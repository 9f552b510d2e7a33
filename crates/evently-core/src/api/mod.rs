//! HTTP client for the event service.

mod client;
mod error;
mod form;
mod types;

pub use client::{ApiClient, USER_AGENT};
pub use error::{ApiError, ApiErrorKind, ApiResult, classify_reqwest_error};
pub use form::{FilePart, MultipartForm};
pub use types::{CreatedEvent, Event, LoginResponse};
