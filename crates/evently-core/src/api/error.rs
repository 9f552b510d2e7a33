//! Failure taxonomy for API operations.
//!
//! Every transport-specific failure is classified here, at the client
//! boundary, so callers only ever branch on these three kinds.

use std::fmt;

use serde_json::Value;

/// Categories of API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request never reached the server or no response came back
    Network,
    /// The server answered with a non-success status
    Server,
    /// Anything else, including malformed success bodies
    Unknown,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Server => write!(f, "server"),
            ApiErrorKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classified failure from an API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Offline, DNS failure, refused connection, timeout.
    Network { message: String },
    /// Remote rejected the request.
    Server {
        status: u16,
        /// User-facing message from the response body, if the body carried one
        message: Option<String>,
        /// Raw response body (for diagnostics)
        body: Option<String>,
    },
    /// Not attributable to the network or a structured rejection.
    Unknown { message: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        ApiError::Unknown {
            message: message.into(),
        }
    }

    /// Creates a server error from a status code and raw body.
    ///
    /// The message is extracted from `{"message": ...}` or
    /// `{"error": {"message": ...}}` when the body is JSON.
    pub fn server(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        ApiError::Server {
            status,
            message,
            body: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Network { .. } => ApiErrorKind::Network,
            ApiError::Server { .. } => ApiErrorKind::Server,
            ApiError::Unknown { .. } => ApiErrorKind::Unknown,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message supplied by the server for display, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let message = json
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })?;
    let trimmed = message.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network { message } => write!(f, "Network error: {message}"),
            ApiError::Server {
                status,
                message: Some(message),
                ..
            } => write!(f, "HTTP {status}: {message}"),
            ApiError::Server { status, .. } => write!(f, "HTTP {status}"),
            ApiError::Unknown { message } => write!(f, "Unexpected error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Classifies a reqwest error into an `ApiError`.
pub fn classify_reqwest_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::network(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        ApiError::network(format!("Connection failed: {e}"))
    } else if e.is_request() {
        ApiError::network(format!("Request error: {e}"))
    } else if e.is_decode() {
        ApiError::unknown(format!("Malformed response: {e}"))
    } else {
        ApiError::unknown(e.to_string())
    }
}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
