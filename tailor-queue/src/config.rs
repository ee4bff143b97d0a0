use std::time::Duration;

use crate::{QueueError, QueueResult};

/// Configuration for a [`RequestQueue`](crate::RequestQueue).
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Maximum number of requests in flight at once.
    pub max_concurrent: usize,

    /// Execution timeout applied when a request does not set its own.
    pub default_timeout: Duration,

    /// Number of latency samples kept per sliding average window.
    pub stats_window: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            default_timeout: Duration::from_secs(30),
            stats_window: 100,
        }
    }
}

impl QueueConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency limit.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// Set the default execution timeout.
    pub fn with_default_timeout(mut self, default_timeout: Duration) -> Self {
        self.default_timeout = default_timeout;
        self
    }

    /// Set the latency sample window size.
    pub fn with_stats_window(mut self, stats_window: usize) -> Self {
        self.stats_window = stats_window;
        self
    }

    /// Reject configurations that would deadlock or divide by zero.
    pub(crate) fn validate(&self) -> QueueResult<()> {
        if self.max_concurrent == 0 {
            return Err(QueueError::Config(
                "max_concurrent must be at least 1".to_string(),
            ));
        }
        if self.stats_window == 0 {
            return Err(QueueError::Config(
                "stats_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
