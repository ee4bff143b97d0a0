use proptest::prelude::*;
use serde_json::json;

use tailor_fieldpath::{
    get_value, set_value, validate_path, FieldPath, FieldSchema, LeafKind, PathError, PathStep,
};

/// A1. Parsing produces typed steps
#[test]
fn parse_produces_property_and_index_steps() {
    let path = FieldPath::parse("experiences[0].title").unwrap();
    assert_eq!(
        path.steps(),
        &[
            PathStep::Property("experiences".to_string()),
            PathStep::Index(0),
            PathStep::Property("title".to_string()),
        ]
    );
}

/// A2. `latest` is an alias for index 0
#[test]
fn latest_parses_to_index_zero() {
    let path = FieldPath::parse("experiences[latest].title").unwrap();
    assert_eq!(path.steps()[1], PathStep::Index(0));
}

/// B1. Out-of-bounds reads are soft
#[test]
fn out_of_bounds_read_yields_none() {
    let doc = json!({"a": {"b": [1, 2, 3]}});
    assert_eq!(get_value(&doc, &"a.b[5]".parse().unwrap()), None);
}

/// B2. Writes create intermediate containers and never mutate the input
#[test]
fn write_into_empty_document() {
    let original = json!({});
    let updated = set_value(&original, &"a.b[0]".parse().unwrap(), json!("x")).unwrap();
    assert_eq!(updated, json!({"a": {"b": ["x"]}}));
    assert_eq!(original, json!({}));
}

/// B3. Out-of-bounds writes are hard errors
#[test]
fn out_of_bounds_write_is_rejected() {
    let original = json!({"a": [1]});
    let err = set_value(&original, &"a[5]".parse().unwrap(), json!("x")).unwrap_err();
    assert!(matches!(err, PathError::IndexOutOfBounds { index: 5, len: 1, .. }));
}

/// C1. Validation flags typos with suggestions
#[test]
fn validation_suggests_for_mistyped_property() {
    let schema = FieldSchema::object([(
        "contact",
        FieldSchema::object([
            ("email", FieldSchema::leaf(LeafKind::String)),
            ("phone", FieldSchema::leaf(LeafKind::String)),
        ]),
    )]);

    let report = validate_path(&"contact.emial".parse().unwrap(), &schema);
    assert!(!report.valid);
    assert!(report.suggestions.contains(&"email".to_string()));
}

/// C2. A schema derived from a sample document validates the same paths
#[test]
fn sample_schema_round_trips_real_paths() {
    let sample = json!({
        "summary": "Engineer with 10 years of...",
        "experiences": [{"title": "Engineer", "highlights": ["Shipped X"]}],
    });
    let schema = FieldSchema::from_sample(&sample);

    assert!(validate_path(&"experiences[3].highlights[0]".parse().unwrap(), &schema).valid);
    assert!(!validate_path(&"experiences[0].titel".parse().unwrap(), &schema).valid);
    assert!(!validate_path(&"summary.tone".parse().unwrap(), &schema).valid);
}

proptest! {
    /// Any write followed by a read of the same path returns the new value.
    #[test]
    fn set_then_get_round_trips(
        first in "[a-z_][a-z0-9_]{0,8}",
        second in "[a-z_][a-z0-9_]{0,8}",
        index in 0usize..4,
        payload in "[a-zA-Z0-9 ]{0,16}",
    ) {
        let text = format!("{first}[{index}].{second}");
        let path: FieldPath = text.parse().unwrap();

        // Pre-grow the array so the index is always writable.
        let mut doc = json!({});
        for i in 0..=index {
            let grow: FieldPath = format!("{first}[{i}].{second}").parse().unwrap();
            doc = set_value(&doc, &grow, json!(null)).unwrap();
        }

        let updated = set_value(&doc, &path, json!(payload.clone())).unwrap();
        prop_assert_eq!(get_value(&updated, &path), Some(&json!(payload)));
    }

    /// Parsing never panics and either yields steps or a classified error.
    #[test]
    fn parse_total_on_arbitrary_input(input in "\\PC{0,24}") {
        match FieldPath::parse(&input) {
            Ok(path) => prop_assert!(!path.steps().is_empty()),
            Err(_) => {}
        }
    }

    /// A parsed path's display form re-parses to the same steps.
    #[test]
    fn display_round_trips(
        head in "[a-z_][a-z0-9_]{0,8}",
        index in 0usize..32,
        tail in "[a-z_][a-z0-9_]{0,8}",
    ) {
        let text = format!("{head}[{index}].{tail}");
        let path: FieldPath = text.parse().unwrap();
        let reparsed: FieldPath = path.to_string().parse().unwrap();
        prop_assert_eq!(path.steps(), reparsed.steps());
    }
}
