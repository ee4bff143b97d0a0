//! # tailor-fieldpath: addressing nested resume JSON
//!
//! Chat-style edits arrive as instructions like "change the title of my
//! latest role". By the time they reach storage they have been resolved to a
//! field path - a small dotted/bracketed syntax for pointing into the resume
//! document without a full JSONPath implementation:
//!
//! ```text
//! contact.email
//! experiences[0].title
//! experiences[latest].highlights[2]
//! ```
//!
//! `latest` always means array index 0; resume arrays are kept newest-first.
//!
//! Three operations cover what the edit pipeline needs:
//!
//! - [`get_value`]: soft reads - a path that dead-ends yields `None`.
//! - [`set_value`]: copy-on-write updates - the input document is never
//!   mutated, missing containers appear on demand, out-of-bounds writes are
//!   hard errors.
//! - [`validate_path`]: check a path against a [`FieldSchema`] tree before
//!   touching data, with Levenshtein-based suggestions for typos.

pub mod error;
pub mod path;
pub mod resolve;
pub mod schema;
pub mod suggest;

pub use error::{PathError, PathResult};
pub use path::{FieldPath, PathStep};
pub use resolve::{get_value, set_value};
pub use schema::{validate_path, FieldSchema, LeafKind, PathReport};
pub use suggest::levenshtein;
