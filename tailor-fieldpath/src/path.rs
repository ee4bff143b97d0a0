//! The path language.
//!
//! A path is one or more dot-separated segments; each segment is a bare
//! identifier (`summary`) or an identifier followed by one bracketed index
//! (`experiences[0]`). The index token `latest` always resolves to position
//! 0 - resume arrays are kept newest-first, so index 0 is the most recent
//! entry.

use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

/// Index token that aliases array position 0.
const LATEST: &str = "latest";

/// One resolved step of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Object property access.
    Property(String),
    /// Array element access.
    Index(usize),
}

/// A parsed dotted/bracketed field path like `experiences[0].title`.
///
/// Parsing is all-or-nothing: a malformed segment fails the whole path and
/// no partial step list is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    steps: Vec<PathStep>,
}

impl FieldPath {
    /// Parse a path string. Equivalent to `input.parse()`.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        input.parse()
    }

    /// The original path text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The resolved steps, in application order.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }

        let mut steps = Vec::new();
        for segment in input.split('.') {
            parse_segment(segment, &mut steps)?;
        }

        Ok(Self {
            raw: input.to_string(),
            steps,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

fn parse_segment(segment: &str, steps: &mut Vec<PathStep>) -> Result<(), PathError> {
    let fail = |segment: &str| PathError::InvalidSegment {
        segment: segment.to_string(),
    };

    let Some(open) = segment.find('[') else {
        // Bare identifier segment; a stray `]` means a bracket never opened.
        if segment.contains(']') {
            return Err(PathError::UnbalancedBrackets {
                segment: segment.to_string(),
            });
        }
        if !is_identifier(segment) {
            return Err(fail(segment));
        }
        steps.push(PathStep::Property(segment.to_string()));
        return Ok(());
    };

    let identifier = &segment[..open];
    if !is_identifier(identifier) {
        return Err(fail(segment));
    }

    if !segment.ends_with(']') {
        return Err(PathError::UnbalancedBrackets {
            segment: segment.to_string(),
        });
    }
    let index_token = &segment[open + 1..segment.len() - 1];
    if index_token.contains('[') || index_token.contains(']') {
        return Err(PathError::UnbalancedBrackets {
            segment: segment.to_string(),
        });
    }
    if index_token.is_empty() {
        return Err(PathError::EmptyBrackets {
            segment: segment.to_string(),
        });
    }

    let index = if index_token == LATEST {
        0
    } else {
        index_token
            .parse::<usize>()
            .map_err(|_| PathError::InvalidIndex {
                segment: segment.to_string(),
                token: index_token.to_string(),
            })?
    };

    steps.push(PathStep::Property(identifier.to_string()));
    steps.push(PathStep::Index(index));
    Ok(())
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_and_indexed_segments() {
        let path = FieldPath::parse("experiences[0].title").unwrap();
        assert_eq!(
            path.steps(),
            &[
                PathStep::Property("experiences".to_string()),
                PathStep::Index(0),
                PathStep::Property("title".to_string()),
            ]
        );
        assert_eq!(path.to_string(), "experiences[0].title");
    }

    #[test]
    fn latest_resolves_to_index_zero() {
        let path = FieldPath::parse("experiences[latest].title").unwrap();
        assert_eq!(path.steps()[1], PathStep::Index(0));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert_eq!(FieldPath::parse(""), Err(PathError::Empty));
    }

    #[test]
    fn empty_segment_between_dots_is_rejected() {
        assert!(matches!(
            FieldPath::parse("a..b"),
            Err(PathError::InvalidSegment { .. })
        ));
        assert!(matches!(
            FieldPath::parse("a."),
            Err(PathError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn bracket_failures_are_classified() {
        assert!(matches!(
            FieldPath::parse("skills["),
            Err(PathError::UnbalancedBrackets { .. })
        ));
        assert!(matches!(
            FieldPath::parse("skills]"),
            Err(PathError::UnbalancedBrackets { .. })
        ));
        assert!(matches!(
            FieldPath::parse("skills[]"),
            Err(PathError::EmptyBrackets { .. })
        ));
        assert!(matches!(
            FieldPath::parse("skills[two]"),
            Err(PathError::InvalidIndex { .. })
        ));
        assert!(matches!(
            FieldPath::parse("skills[-1]"),
            Err(PathError::InvalidIndex { .. })
        ));
        assert!(matches!(
            FieldPath::parse("skills[0][1]"),
            Err(PathError::UnbalancedBrackets { .. })
        ));
    }

    #[test]
    fn identifiers_must_not_start_with_digits() {
        assert!(matches!(
            FieldPath::parse("0skills"),
            Err(PathError::InvalidSegment { .. })
        ));
        assert!(FieldPath::parse("_private.raw_text").is_ok());
    }

    #[test]
    fn trailing_garbage_after_brackets_is_rejected() {
        assert!(matches!(
            FieldPath::parse("skills[0]x"),
            Err(PathError::UnbalancedBrackets { .. })
        ));
    }
}
