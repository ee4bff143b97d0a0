use serde::{Deserialize, Serialize};

/// Request priority for queue ordering (higher values are serviced first).
///
/// Any integer is accepted; the named bands are conventions used by the
/// service layer when it tags interactive edits vs. background batch work.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Priority(i32);

impl Priority {
    /// User is actively waiting on this response.
    pub const CRITICAL: Priority = Priority(10);

    /// Interactive but tolerable to queue briefly.
    pub const HIGH: Priority = Priority(5);

    /// Default for ordinary optimization requests.
    pub const NORMAL: Priority = Priority(0);

    /// Deferred work, e.g. re-scoring after an edit.
    pub const LOW: Priority = Priority(-5);

    /// Bulk/batch work with no one waiting.
    pub const BATCH: Priority = Priority(-10);

    /// Create a priority from an arbitrary integer.
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the numeric value for ordering.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Get the band name if the value matches one.
    pub fn band_name(self) -> Option<&'static str> {
        match self.0 {
            10 => Some("critical"),
            5 => Some("high"),
            0 => Some("normal"),
            -5 => Some("low"),
            -10 => Some("batch"),
            _ => None,
        }
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.band_name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Self::CRITICAL),
            "high" => Ok(Self::HIGH),
            "normal" => Ok(Self::NORMAL),
            "low" => Ok(Self::LOW),
            "batch" => Ok(Self::BATCH),
            other => other
                .parse::<i32>()
                .map(Self)
                .map_err(|_| format!("Invalid priority: {}", s)),
        }
    }
}
