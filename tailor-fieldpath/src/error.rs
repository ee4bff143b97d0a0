use serde_json::json;
use tailor_core::TailorError;
use thiserror::Error;

/// Result type for path operations.
pub type PathResult<T> = Result<T, PathError>;

/// Ways a field path can fail to parse or apply.
///
/// Reads never produce these; a read that goes nowhere yields `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("field path is empty")]
    Empty,

    #[error("empty brackets in segment `{segment}`")]
    EmptyBrackets { segment: String },

    #[error("unbalanced brackets in segment `{segment}`")]
    UnbalancedBrackets { segment: String },

    #[error("invalid index `{token}` in segment `{segment}` (expected a non-negative integer or `latest`)")]
    InvalidIndex { segment: String, token: String },

    #[error("invalid segment `{segment}`")]
    InvalidSegment { segment: String },

    #[error("index {index} out of bounds for array of length {len} in `{path}`")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    #[error("cannot write through `{segment}` in `{path}`: existing value is not {expected}")]
    WrongTarget {
        path: String,
        segment: String,
        expected: &'static str,
    },
}

impl From<PathError> for TailorError {
    fn from(err: PathError) -> Self {
        let tailor = TailorError::unprocessable(err.to_string());
        match &err {
            PathError::Empty => tailor,
            PathError::EmptyBrackets { segment }
            | PathError::UnbalancedBrackets { segment }
            | PathError::InvalidSegment { segment } => {
                tailor.with_data(json!({ "segment": segment }))
            }
            PathError::InvalidIndex { segment, token } => {
                tailor.with_data(json!({ "segment": segment, "token": token }))
            }
            PathError::IndexOutOfBounds { path, index, len } => {
                tailor.with_data(json!({ "path": path, "index": index, "len": len }))
            }
            PathError::WrongTarget { path, segment, .. } => {
                tailor.with_data(json!({ "path": path, "segment": segment }))
            }
        }
    }
}
