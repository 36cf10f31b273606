//! Network and server error type.

use derive_more::{Display, Error};
use tracing::instrument;

/// Any failed exchange with the backend: transport failure, timeout,
/// non-success status, or an undecodable body.
#[derive(Debug, Clone, Display, Error)]
#[display("Request failed: {} at {}:{}", message, file, line)]
pub struct ApiError {
    /// Short human-readable message.
    pub message: String,
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ApiError {
    /// Creates a new API error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: None,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates an error for a non-success HTTP status.
    #[track_caller]
    #[instrument(skip(body))]
    pub fn status(status: u16, body: &str) -> Self {
        let detail = body.trim();
        let message = if detail.is_empty() || detail.len() > 120 {
            format!("Server returned {}", status)
        } else {
            format!("Server returned {}: {}", status, detail)
        };
        Self {
            status: Some(status),
            ..Self::new(message)
        }
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            "Could not reach the game server".to_string()
        } else if err.is_decode() {
            format!("Unexpected response from server: {}", err)
        } else {
            format!("Network error: {}", err)
        };
        Self {
            status: err.status().map(|s| s.as_u16()),
            ..Self::new(message)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Unexpected response from server: {}", err))
    }
}
