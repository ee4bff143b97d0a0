//! Rolling queue statistics.
//!
//! Counters are cumulative since creation (or the last reset); latency
//! averages are computed over a sliding window of recent samples so a burst
//! of slow upstream calls shows up quickly and ages out just as fast.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of queue health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    /// Requests waiting for admission.
    pub queue_size: usize,

    /// Requests currently in flight.
    pub active_requests: usize,

    /// Requests that settled successfully.
    pub completed_requests: u64,

    /// Requests that settled with an error (including timeouts).
    pub failed_requests: u64,

    /// Mean enqueue-to-admission latency over the sample window.
    #[serde(with = "duration_ms")]
    pub average_wait_time: Duration,

    /// Mean admission-to-settlement latency over the sample window.
    #[serde(with = "duration_ms")]
    pub average_process_time: Duration,
}

/// Mutable counters and sample windows, owned by the queue behind its lock.
#[derive(Debug, Default)]
pub(crate) struct StatsState {
    pub completed: u64,
    pub failed: u64,
    wait_samples: VecDeque<Duration>,
    process_samples: VecDeque<Duration>,
}

impl StatsState {
    pub fn record_wait(&mut self, sample: Duration, window: usize) {
        push_bounded(&mut self.wait_samples, sample, window);
    }

    pub fn record_process(&mut self, sample: Duration, window: usize) {
        push_bounded(&mut self.process_samples, sample, window);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self, queue_size: usize, active_requests: usize) -> QueueStats {
        QueueStats {
            queue_size,
            active_requests,
            completed_requests: self.completed,
            failed_requests: self.failed,
            average_wait_time: average(&self.wait_samples),
            average_process_time: average(&self.process_samples),
        }
    }
}

fn push_bounded(samples: &mut VecDeque<Duration>, sample: Duration, window: usize) {
    samples.push_back(sample);
    while samples.len() > window {
        samples.pop_front();
    }
}

/// Millisecond-rounded mean; zero when no samples have been recorded.
fn average(samples: &VecDeque<Duration>) -> Duration {
    if samples.is_empty() {
        return Duration::ZERO;
    }
    let total_ms: u64 = samples.iter().map(|d| d.as_millis() as u64).sum();
    Duration::from_millis(total_ms / samples.len() as u64)
}

/// Serde adapter: durations cross the wire as integer milliseconds.
pub(crate) mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_are_zero_without_samples() {
        let state = StatsState::default();
        let stats = state.snapshot(0, 0);
        assert_eq!(stats.average_wait_time, Duration::ZERO);
        assert_eq!(stats.average_process_time, Duration::ZERO);
    }

    #[test]
    fn window_discards_oldest_samples() {
        let mut state = StatsState::default();
        // One slow outlier, then a window full of fast samples.
        state.record_process(Duration::from_millis(1000), 3);
        for _ in 0..3 {
            state.record_process(Duration::from_millis(100), 3);
        }
        let stats = state.snapshot(0, 0);
        assert_eq!(stats.average_process_time, Duration::from_millis(100));
    }

    #[test]
    fn snapshot_serializes_durations_as_millis() {
        let mut state = StatsState::default();
        state.record_wait(Duration::from_millis(250), 100);
        state.completed = 4;

        let stats = state.snapshot(2, 1);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["average_wait_time"], 250);
        assert_eq!(json["completed_requests"], 4);
    }

    #[test]
    fn reset_zeroes_counters_and_windows() {
        let mut state = StatsState::default();
        state.completed = 7;
        state.failed = 2;
        state.record_wait(Duration::from_millis(80), 100);
        state.reset();

        let stats = state.snapshot(0, 0);
        assert_eq!(stats.completed_requests, 0);
        assert_eq!(stats.failed_requests, 0);
        assert_eq!(stats.average_wait_time, Duration::ZERO);
    }
}
