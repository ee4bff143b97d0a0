use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a queued request.
///
/// Derived from a per-queue sequence, unique within the process lifetime and
/// used only for logging and event correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    /// Build a request ID from a sequence number.
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("req-{}", sequence))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
