//! # tailor-queue: admission control for external AI calls
//!
//! The optimization service fans every user action out to a paid, rate
//! limited LLM API. This crate bounds how many of those calls are in flight
//! at once while letting callers express relative urgency:
//!
//! - **Priority ordering**: higher priority drains first; equal priorities
//!   keep FIFO arrival order and are never re-ordered.
//! - **Bounded concurrency**: at most `max_concurrent` requests in flight;
//!   admission re-runs on every settlement, no polling.
//! - **Timeout racing**: each request carries a time limit; a hung upstream
//!   call is abandoned (not cancelled) and the caller gets a timeout error.
//! - **Rolling statistics**: completed/failed counters plus wait and process
//!   latency averages over a sliding sample window.
//! - **Structured events**: a broadcast lifecycle stream for dashboards and
//!   tests, in the same spirit as the service's other event feeds.
//!
//! This is a best-effort, single-process limiter: nothing is persisted, and
//! pending work is silently lost on restart. Deployments running several
//! instances need an external broker instead.
//!
//! ```no_run
//! use tailor_queue::{Priority, RequestError, RequestOptions, RequestQueue};
//!
//! # async fn demo() -> Result<(), tailor_queue::QueueError> {
//! let queue = RequestQueue::new();
//!
//! let rewritten = queue
//!     .enqueue_with(
//!         RequestOptions::new().with_priority(Priority::CRITICAL),
//!         || async { Ok::<_, RequestError>("rewritten bullet".to_string()) },
//!     )
//!     .await?;
//! # let _ = rewritten;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod queue;
pub mod stats;
pub mod types;

pub use config::QueueConfig;
pub use error::{QueueError, QueueResult, RequestError};
pub use queue::RequestQueue;
pub use stats::QueueStats;
pub use types::{Priority, RequestEvent, RequestId, RequestOptions};

/// Everything a typical caller needs.
pub mod prelude {
    pub use crate::{
        Priority, QueueConfig, QueueError, QueueResult, QueueStats, RequestError, RequestOptions,
        RequestQueue,
    };
}
