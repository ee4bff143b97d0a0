use std::time::Duration;

use super::Priority;

/// Per-request submission options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Relative urgency; higher drains first.
    pub priority: Priority,

    /// Upper bound on execution duration. `None` means the queue's
    /// configured default applies.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set an explicit execution timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
