//! Applying parsed paths to JSON documents.
//!
//! Reads are soft: anything that would make the walk meaningless (a missing
//! property, an index into a non-array, an out-of-bounds index) yields
//! `None`. Writes are copy-on-write and strict: the input document is never
//! mutated, missing intermediate containers are created on demand, and an
//! out-of-bounds array write is a hard error.

use serde_json::{Map, Value};

use crate::error::PathError;
use crate::path::{FieldPath, PathStep};

/// Read the value at `path`, or `None` if the walk dead-ends.
pub fn get_value<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = root;
    for step in path.steps() {
        current = match step {
            PathStep::Property(name) => current.as_object()?.get(name)?,
            PathStep::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

/// Return a deep copy of `root` with the value at `path` replaced.
///
/// Missing intermediate containers are created on demand; whether an object
/// or an array appears is decided by the step that follows. Array writes may
/// target any existing position or the one just past the end (append);
/// anything further is [`PathError::IndexOutOfBounds`]. Writing through an
/// existing value of the wrong shape is [`PathError::WrongTarget`].
pub fn set_value(root: &Value, path: &FieldPath, new_value: Value) -> Result<Value, PathError> {
    let mut updated = root.clone();
    write_steps(&mut updated, path.steps(), new_value, path)?;
    Ok(updated)
}

fn write_steps(
    target: &mut Value,
    steps: &[PathStep],
    new_value: Value,
    path: &FieldPath,
) -> Result<(), PathError> {
    let Some((step, rest)) = steps.split_first() else {
        *target = new_value;
        return Ok(());
    };

    match step {
        PathStep::Property(name) => {
            // Null counts as missing and becomes the container the step needs.
            if target.is_null() {
                *target = Value::Object(Map::new());
            }
            let map = target
                .as_object_mut()
                .ok_or_else(|| PathError::WrongTarget {
                    path: path.raw().to_string(),
                    segment: name.clone(),
                    expected: "an object",
                })?;
            let slot = map.entry(name.clone()).or_insert(Value::Null);
            write_steps(slot, rest, new_value, path)
        }
        PathStep::Index(index) => {
            if target.is_null() {
                *target = Value::Array(Vec::new());
            }
            let array = target
                .as_array_mut()
                .ok_or_else(|| PathError::WrongTarget {
                    path: path.raw().to_string(),
                    segment: format!("[{index}]"),
                    expected: "an array",
                })?;
            if *index > array.len() {
                return Err(PathError::IndexOutOfBounds {
                    path: path.raw().to_string(),
                    index: *index,
                    len: array.len(),
                });
            }
            if *index == array.len() {
                array.push(Value::Null);
            }
            write_steps(&mut array[*index], rest, new_value, path)
        }
    }
}
