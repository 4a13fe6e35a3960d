//! Error taxonomy for calls to the backend.

use thiserror::Error;

/// Errors that can occur while talking to the backend.
///
/// Cancellation is not an error; it is reported as
/// [`Outcome::Cancelled`](crate::lifecycle::Outcome) by the lifecycle layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset mid-response.
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },

    /// Server answered with a non-success status.
    #[error("Server error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the server rejected the session token.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }

    /// User-facing message for flash messages and inline errors.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "Could not reach the server. Please try again.",
            ApiError::Timeout { .. } => "The server took too long to respond.",
            ApiError::Status { status, .. } if *status == 401 || *status == 403 => {
                "Your session has expired. Please log in again."
            }
            ApiError::Status { .. } => "There was a problem on the server.",
            ApiError::Decode(_) => "The server sent an unexpected response.",
        }
    }
}
