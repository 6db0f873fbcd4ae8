//! Domain error type.

use thiserror::Error;

/// A request-level failure carrying a user-facing message.
///
/// All domain validation failures surface as this single kind; the API layer
/// translates it into an HTTP error response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    /// Create a new request error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
