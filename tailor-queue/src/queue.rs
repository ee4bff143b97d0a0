//! The admission engine.
//!
//! One `RequestQueue` fronts one external AI provider. Callers submit work as
//! async closures; the queue holds them in a priority-ordered pending list and
//! keeps at most `max_concurrent` of them in flight. Admission re-runs every
//! time an in-flight request settles, so the queue drains without polling.
//!
//! All state is process-local and single-writer behind one mutex that is
//! never held across an await point. A multi-instance deployment would need
//! an external broker; this is deliberately a best-effort in-memory limiter
//! for one process.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use parking_lot::Mutex;
use tokio::sync::{broadcast, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::QueueConfig;
use crate::error::{QueueError, QueueResult, RequestError};
use crate::stats::{QueueStats, StatsState};
use crate::types::{Priority, RequestEvent, RequestId, RequestOptions};

const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// How a pending request leaves the pending list.
enum Fate {
    /// Admitted for execution.
    Run,
    /// Discarded without running (queue cleared).
    Discard(QueueError),
}

/// Terminal outcome of an admitted request, as seen by the queue.
enum Settled {
    Completed,
    Failed(String),
    TimedOut(Duration),
}

/// Type-erased continuation for one pending request. The caller's typed
/// result channel lives inside; dispatching with [`Fate::Run`] yields the
/// execution future, [`Fate::Discard`] settles the caller immediately and
/// yields nothing.
type Continuation = Box<dyn FnOnce(Fate) -> Option<BoxFuture<'static, Settled>> + Send>;

struct PendingRequest {
    id: RequestId,
    priority: Priority,
    enqueued_at: Instant,
    continuation: Continuation,
}

#[derive(Default)]
struct QueueState {
    /// Ordered by non-increasing priority, FIFO among equals.
    pending: Vec<PendingRequest>,
    /// Requests admitted and not yet settled.
    active: usize,
    stats: StatsState,
}

/// Priority-ordered admission gate for calls to an external AI service.
///
/// Cheap to clone; clones share the same pending list, counters, and event
/// channel. Pass a handle wherever one is needed instead of reaching for a
/// process-global.
///
/// ```no_run
/// use tailor_queue::{Priority, RequestError, RequestOptions, RequestQueue};
///
/// # async fn demo() -> Result<(), tailor_queue::QueueError> {
/// let queue = RequestQueue::new();
/// let score = queue
///     .enqueue_with(
///         RequestOptions::new().with_priority(Priority::HIGH),
///         || async {
///             // call the hosted model here
///             Ok::<_, RequestError>(0.87_f64)
///         },
///     )
///     .await?;
/// # let _ = score;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RequestQueue {
    config: QueueConfig,
    state: Arc<Mutex<QueueState>>,
    events: broadcast::Sender<RequestEvent>,
    sequence: Arc<AtomicU64>,
}

impl RequestQueue {
    /// Create a queue with default configuration.
    pub fn new() -> Self {
        Self::build(QueueConfig::default())
    }

    /// Create a queue with custom configuration.
    pub fn with_config(config: QueueConfig) -> QueueResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: QueueConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            state: Arc::new(Mutex::new(QueueState::default())),
            events,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get the queue configuration.
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Submit work at normal priority with the default timeout.
    pub async fn enqueue<T, F, Fut>(&self, execute: F) -> QueueResult<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, RequestError>> + Send + 'static,
    {
        self.enqueue_with(RequestOptions::default(), execute).await
    }

    /// Submit work with explicit priority and timeout.
    ///
    /// The returned future settles exactly once: with the work's own result,
    /// with [`QueueError::Timeout`] if the time limit elapses first, or with
    /// [`QueueError::Cleared`] if the queue is cleared before admission.
    /// `execute` is not invoked until the request is admitted.
    pub async fn enqueue_with<T, F, Fut>(&self, options: RequestOptions, execute: F) -> QueueResult<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, RequestError>> + Send + 'static,
    {
        let id = RequestId::from_sequence(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let priority = options.priority;
        let timeout = options.timeout.unwrap_or(self.config.default_timeout);
        let (tx, rx) = oneshot::channel::<QueueResult<T>>();

        let continuation: Continuation = Box::new(move |fate| match fate {
            Fate::Discard(err) => {
                let _ = tx.send(Err(err));
                None
            }
            Fate::Run => Some(Box::pin(async move {
                // The work runs as its own task so losing the race does not
                // cancel it; the abandoned call keeps running and only its
                // result is discarded. The timer is dropped if the work wins.
                let work = tokio::spawn(execute());
                let outcome = match tokio::time::timeout(timeout, work).await {
                    Ok(Ok(Ok(value))) => Ok(value),
                    Ok(Ok(Err(err))) => Err(QueueError::Request(err)),
                    Ok(Err(join_err)) => Err(QueueError::Request(RequestError::new(format!(
                        "request task aborted: {join_err}"
                    )))),
                    Err(_) => Err(QueueError::Timeout(timeout)),
                };
                let settled = match &outcome {
                    Ok(_) => Settled::Completed,
                    Err(QueueError::Timeout(limit)) => Settled::TimedOut(*limit),
                    Err(err) => Settled::Failed(err.to_string()),
                };
                let _ = tx.send(outcome);
                settled
            })),
        });

        let queue_size = {
            let mut state = self.state.lock();
            // Insert before the first strictly lower priority; equal
            // priorities keep arrival order.
            let position = state
                .pending
                .iter()
                .position(|existing| priority > existing.priority)
                .unwrap_or(state.pending.len());
            state.pending.insert(
                position,
                PendingRequest {
                    id: id.clone(),
                    priority,
                    enqueued_at: Instant::now(),
                    continuation,
                },
            );
            state.pending.len()
        };

        debug!(id = %id, %priority, queue_size, "request enqueued");
        self.emit(RequestEvent::Enqueued {
            id: id.clone(),
            priority,
            queue_size,
            at: Utc::now(),
        });

        self.admit_ready();

        rx.await.map_err(|_| QueueError::Disconnected)?
    }

    /// Reject every pending (not yet admitted) request with
    /// [`QueueError::Cleared`] and empty the pending list. In-flight
    /// requests are unaffected and settle normally. Returns the number of
    /// requests discarded.
    pub fn clear(&self) -> usize {
        let drained: Vec<PendingRequest> = {
            let mut state = self.state.lock();
            state.pending.drain(..).collect()
        };
        let discarded = drained.len();
        for item in drained {
            debug!(id = %item.id, "pending request discarded");
            (item.continuation)(Fate::Discard(QueueError::Cleared));
        }
        if discarded > 0 {
            info!(discarded, "queue cleared");
            self.emit(RequestEvent::Cleared {
                discarded,
                at: Utc::now(),
            });
        }
        discarded
    }

    /// Snapshot current counters and averages. Pure read.
    pub fn stats(&self) -> QueueStats {
        let state = self.state.lock();
        state.stats.snapshot(state.pending.len(), state.active)
    }

    /// Zero the counters and latency windows. Pending and in-flight
    /// requests are unaffected.
    pub fn reset_stats(&self) {
        self.state.lock().stats.reset();
    }

    /// Subscribe to the lifecycle event stream. Lossy under lag (broadcast
    /// semantics): a slow subscriber skips events rather than backpressuring
    /// the queue.
    pub fn subscribe(&self) -> BoxStream<'static, RequestEvent> {
        use tokio_stream::{wrappers::BroadcastStream, StreamExt};
        let receiver = self.events.subscribe();
        let stream = BroadcastStream::new(receiver).filter_map(|result| result.ok());
        Box::pin(stream)
    }

    /// Move pending work into flight while capacity allows.
    fn admit_ready(&self) {
        loop {
            let (item, waited) = {
                let mut state = self.state.lock();
                if state.active >= self.config.max_concurrent || state.pending.is_empty() {
                    return;
                }
                state.active += 1;
                let item = state.pending.remove(0);
                let waited = item.enqueued_at.elapsed();
                state.stats.record_wait(waited, self.config.stats_window);
                (item, waited)
            };
            self.run_admitted(item, waited);
        }
    }

    fn run_admitted(&self, item: PendingRequest, waited: Duration) {
        let PendingRequest {
            id, continuation, ..
        } = item;

        debug!(id = %id, waited_ms = waited.as_millis() as u64, "request admitted");
        self.emit(RequestEvent::Admitted {
            id: id.clone(),
            waited,
            at: Utc::now(),
        });

        let Some(job) = continuation(Fate::Run) else {
            // A Run dispatch always yields a job; keep the slot accounting
            // honest regardless.
            self.release_slot();
            return;
        };

        let queue = self.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let settled = job.await;
            let elapsed = started.elapsed();

            {
                let mut state = queue.state.lock();
                state.active -= 1;
                state.stats.record_process(elapsed, queue.config.stats_window);
                match settled {
                    Settled::Completed => state.stats.completed += 1,
                    _ => state.stats.failed += 1,
                }
            }

            match &settled {
                Settled::Completed => {
                    debug!(id = %id, elapsed_ms = elapsed.as_millis() as u64, "request completed");
                    queue.emit(RequestEvent::Completed {
                        id: id.clone(),
                        elapsed,
                        at: Utc::now(),
                    });
                }
                Settled::Failed(error) => {
                    warn!(id = %id, error = %error, "request failed");
                    queue.emit(RequestEvent::Failed {
                        id: id.clone(),
                        error: error.clone(),
                        elapsed,
                        at: Utc::now(),
                    });
                }
                Settled::TimedOut(limit) => {
                    warn!(id = %id, limit_ms = limit.as_millis() as u64, "request timed out");
                    queue.emit(RequestEvent::TimedOut {
                        id: id.clone(),
                        limit: *limit,
                        at: Utc::now(),
                    });
                }
            }

            queue.admit_ready();
        });
    }

    fn release_slot(&self) {
        {
            let mut state = self.state.lock();
            state.active -= 1;
        }
        self.admit_ready();
    }

    fn emit(&self, event: RequestEvent) {
        let _ = self.events.send(event);
    }
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new()
    }
}
