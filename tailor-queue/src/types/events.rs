use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Priority, RequestId};
use crate::stats::duration_ms;

/// Minimal stable event protocol for structured observability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RequestEvent {
    /// Request entered the pending list.
    Enqueued {
        id: RequestId,
        priority: Priority,
        queue_size: usize,
        at: DateTime<Utc>,
    },

    /// Request moved from pending to in-flight.
    Admitted {
        id: RequestId,
        #[serde(with = "duration_ms")]
        waited: Duration,
        at: DateTime<Utc>,
    },

    /// Request settled successfully.
    Completed {
        id: RequestId,
        #[serde(with = "duration_ms")]
        elapsed: Duration,
        at: DateTime<Utc>,
    },

    /// Request settled with an upstream error.
    Failed {
        id: RequestId,
        error: String,
        #[serde(with = "duration_ms")]
        elapsed: Duration,
        at: DateTime<Utc>,
    },

    /// Request hit its execution time limit.
    TimedOut {
        id: RequestId,
        #[serde(with = "duration_ms")]
        limit: Duration,
        at: DateTime<Utc>,
    },

    /// Pending requests were discarded by `clear()`.
    Cleared { discarded: usize, at: DateTime<Utc> },
}

impl RequestEvent {
    /// Get the event type name as a string.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Enqueued { .. } => "enqueued",
            Self::Admitted { .. } => "admitted",
            Self::Completed { .. } => "completed",
            Self::Failed { .. } => "failed",
            Self::TimedOut { .. } => "timed_out",
            Self::Cleared { .. } => "cleared",
        }
    }

    /// Get the request ID, if the event concerns a single request.
    pub fn request_id(&self) -> Option<&RequestId> {
        match self {
            Self::Enqueued { id, .. }
            | Self::Admitted { id, .. }
            | Self::Completed { id, .. }
            | Self::Failed { id, .. }
            | Self::TimedOut { id, .. } => Some(id),
            Self::Cleared { .. } => None,
        }
    }

    /// Get the timestamp from any event.
    pub fn at(&self) -> &DateTime<Utc> {
        match self {
            Self::Enqueued { at, .. }
            | Self::Admitted { at, .. }
            | Self::Completed { at, .. }
            | Self::Failed { at, .. }
            | Self::TimedOut { at, .. }
            | Self::Cleared { at, .. } => at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_and_ids_line_up() {
        let event = RequestEvent::TimedOut {
            id: RequestId::from_sequence(3),
            limit: Duration::from_secs(30),
            at: Utc::now(),
        };
        assert_eq!(event.event_name(), "timed_out");
        assert_eq!(event.request_id().unwrap().as_str(), "req-3");

        let cleared = RequestEvent::Cleared {
            discarded: 2,
            at: Utc::now(),
        };
        assert_eq!(cleared.event_name(), "cleared");
        assert!(cleared.request_id().is_none());
    }
}
