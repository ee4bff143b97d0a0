use std::time::Duration;

use serde_json::json;
use tailor_core::TailorError;
use thiserror::Error;

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Ways a queued request can fail to produce a result.
#[derive(Error, Debug, Clone)]
pub enum QueueError {
    /// Execution exceeded its time limit. The underlying call keeps running
    /// detached; only its result is discarded.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The queue was cleared before this request was admitted.
    #[error("queue cleared before request was admitted")]
    Cleared,

    /// The request itself failed (upstream AI error, bad response, ...).
    #[error("request failed: {0}")]
    Request(#[from] RequestError),

    /// The executing side went away without settling the request.
    #[error("request worker disconnected before settling")]
    Disconnected,

    /// The queue was built with an unusable configuration.
    #[error("invalid queue configuration: {0}")]
    Config(String),
}

/// A failure produced by the caller-supplied work.
///
/// The queue does not classify upstream failures; everything it knows about
/// one is the message (timeouts get their own [`QueueError`] variant).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestError {
    message: String,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for RequestError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for RequestError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<QueueError> for TailorError {
    fn from(err: QueueError) -> Self {
        match &err {
            QueueError::Timeout(limit) => TailorError::timeout(err.to_string())
                .with_data(json!({ "limitMs": limit.as_millis() as u64 })),
            QueueError::Cleared | QueueError::Disconnected => {
                TailorError::unavailable(err.to_string())
            }
            QueueError::Request(_) => TailorError::bad_gateway(err.to_string()),
            QueueError::Config(_) => TailorError::general_error(err.to_string()),
        }
    }
}
