//! Schema trees and path validation.
//!
//! A [`FieldSchema`] is an explicit tagged tree describing the expected shape
//! of a resume document. Validating a path against it reports the first
//! point of divergence in the same dotted/bracketed notation the paths use,
//! plus close-match suggestions when a property name looks mistyped.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use tailor_core::TailorError;

use crate::path::{FieldPath, PathStep};
use crate::suggest::suggestions_for;

/// Terminal value classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    String,
    Number,
    Bool,
    /// Unknown shape; accepts any steps beneath it.
    Any,
}

/// Expected shape of a document subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSchema {
    Leaf(LeafKind),
    Object(BTreeMap<String, FieldSchema>),
    /// Element schema stands in for every position.
    Array(Box<FieldSchema>),
}

impl FieldSchema {
    pub fn leaf(kind: LeafKind) -> Self {
        Self::Leaf(kind)
    }

    pub fn any() -> Self {
        Self::Leaf(LeafKind::Any)
    }

    pub fn array(element: FieldSchema) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldSchema)>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(key, schema)| (key.into(), schema))
                .collect(),
        )
    }

    /// Derive a schema from a representative document. The first element of
    /// an array stands in for the element schema; an empty array, like a
    /// null, becomes [`LeafKind::Any`].
    pub fn from_sample(sample: &Value) -> Self {
        match sample {
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Self::from_sample(value)))
                    .collect(),
            ),
            Value::Array(items) => Self::Array(Box::new(
                items.first().map(Self::from_sample).unwrap_or(Self::any()),
            )),
            Value::String(_) => Self::Leaf(LeafKind::String),
            Value::Number(_) => Self::Leaf(LeafKind::Number),
            Value::Bool(_) => Self::Leaf(LeafKind::Bool),
            Value::Null => Self::any(),
        }
    }
}

/// Outcome of validating a path against a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathReport {
    pub valid: bool,
    /// Human-readable description of the first divergence.
    pub divergence: Option<String>,
    /// Close-match property names when the divergence looks like a typo.
    pub suggestions: Vec<String>,
}

impl PathReport {
    fn ok() -> Self {
        Self {
            valid: true,
            divergence: None,
            suggestions: Vec::new(),
        }
    }

    fn diverged(message: String, suggestions: Vec<String>) -> Self {
        Self {
            valid: false,
            divergence: Some(message),
            suggestions,
        }
    }

    /// Convert an invalid report into the service error envelope.
    pub fn into_unprocessable_anyhow(self, message: &str) -> anyhow::Error {
        let divergence = self
            .divergence
            .unwrap_or_else(|| "field path does not match the document schema".to_string());
        TailorError::unprocessable(message)
            .with_errors(json!({
                "divergence": divergence,
                "suggestions": self.suggestions,
            }))
            .into_anyhow()
    }
}

/// Walk `path` against `schema` and report the first divergence.
pub fn validate_path(path: &FieldPath, schema: &FieldSchema) -> PathReport {
    let mut current = schema;
    let mut walked = String::new();

    for step in path.steps() {
        match (step, current) {
            (_, FieldSchema::Leaf(LeafKind::Any)) => return PathReport::ok(),

            (PathStep::Property(name), FieldSchema::Object(fields)) => match fields.get(name) {
                Some(next) => {
                    walked = join_path(&walked, name);
                    current = next;
                }
                None => {
                    let suggestions = suggestions_for(name, fields.keys().map(String::as_str));
                    return PathReport::diverged(
                        format!("unknown property `{}` {}", name, location(&walked)),
                        suggestions,
                    );
                }
            },

            (PathStep::Index(index), FieldSchema::Array(element)) => {
                walked = join_index(&walked, *index);
                current = element.as_ref();
            }

            (PathStep::Property(name), FieldSchema::Array(_)) => {
                return PathReport::diverged(
                    format!(
                        "expected an index into the array {}, found property `{}`",
                        location(&walked),
                        name
                    ),
                    Vec::new(),
                );
            }

            (PathStep::Index(index), FieldSchema::Object(_)) => {
                return PathReport::diverged(
                    format!("cannot index with [{}] into the object {}", index, location(&walked)),
                    Vec::new(),
                );
            }

            (step, FieldSchema::Leaf(_)) => {
                let rendered = match step {
                    PathStep::Property(name) => format!("`{name}`"),
                    PathStep::Index(index) => format!("[{index}]"),
                };
                return PathReport::diverged(
                    format!(
                        "path continues with {} past the leaf value {}",
                        rendered,
                        location(&walked)
                    ),
                    Vec::new(),
                );
            }
        }
    }

    PathReport::ok()
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn join_index(prefix: &str, idx: usize) -> String {
    format!("{prefix}[{idx}]")
}

fn location(walked: &str) -> String {
    if walked.is_empty() {
        "at the document root".to_string()
    } else {
        format!("at `{walked}`")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resume_schema() -> FieldSchema {
        FieldSchema::object([
            (
                "contact",
                FieldSchema::object([
                    ("email", FieldSchema::leaf(LeafKind::String)),
                    ("phone", FieldSchema::leaf(LeafKind::String)),
                ]),
            ),
            (
                "experiences",
                FieldSchema::array(FieldSchema::object([
                    ("title", FieldSchema::leaf(LeafKind::String)),
                    ("years", FieldSchema::leaf(LeafKind::Number)),
                ])),
            ),
        ])
    }

    #[test]
    fn valid_paths_pass() {
        let schema = resume_schema();
        let report = validate_path(&"experiences[0].title".parse().unwrap(), &schema);
        assert!(report.valid);
        assert!(report.divergence.is_none());
    }

    #[test]
    fn typos_get_suggestions() {
        let schema = resume_schema();
        let report = validate_path(&"contact.emial".parse().unwrap(), &schema);
        assert!(!report.valid);
        assert!(report.suggestions.contains(&"email".to_string()));
        assert!(report.divergence.unwrap().contains("emial"));
    }

    #[test]
    fn indexing_an_object_diverges() {
        let schema = resume_schema();
        let report = validate_path(&"contact[0]".parse().unwrap(), &schema);
        assert!(!report.valid);
        assert!(report.divergence.unwrap().contains("contact"));
    }

    #[test]
    fn property_on_array_diverges() {
        let schema = resume_schema();
        let report = validate_path(&"experiences.title".parse().unwrap(), &schema);
        assert!(!report.valid);
    }

    #[test]
    fn steps_past_a_leaf_diverge() {
        let schema = resume_schema();
        let report = validate_path(&"contact.email.domain".parse().unwrap(), &schema);
        assert!(!report.valid);
        assert!(report.divergence.unwrap().contains("contact.email"));
    }

    #[test]
    fn any_leaf_accepts_everything_beneath() {
        let schema = FieldSchema::object([("metadata", FieldSchema::any())]);
        let report = validate_path(&"metadata.some.deep[3].field".parse().unwrap(), &schema);
        assert!(report.valid);
    }

    #[test]
    fn sample_derived_schema_matches_hand_built() {
        let sample = json!({
            "contact": {"email": "a@b.c", "phone": "555"},
            "experiences": [{"title": "Engineer", "years": 3}],
        });
        let schema = FieldSchema::from_sample(&sample);
        assert!(validate_path(&"experiences[2].years".parse().unwrap(), &schema).valid);
        assert!(!validate_path(&"experiences[0].company".parse().unwrap(), &schema).valid);
    }

    #[test]
    fn invalid_report_becomes_unprocessable_envelope() {
        let schema = resume_schema();
        let report = validate_path(&"contact.emial".parse().unwrap(), &schema);
        let err = report.into_unprocessable_anyhow("resume field path rejected");
        let tailor = TailorError::from_anyhow(&err).expect("must be TailorError");
        assert_eq!(tailor.code(), 422);
        assert_eq!(tailor.errors.as_ref().unwrap()["suggestions"][0], "email");
    }
}
