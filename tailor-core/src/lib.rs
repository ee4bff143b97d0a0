//! tailor-core: shared service plumbing for the Tailor stack.
//!
//! Every fallible surface in Tailor ends up answering an HTTP request, so the
//! crates in this workspace agree on one structured error shape:
//! - consistent status codes + class names
//! - can be carried through `anyhow::Error` across crate boundaries
//! - transport-agnostic (the server crate decides how to serialize)
//!
//! The envelope produced by [`TailorError::to_json`] is what route handlers
//! return verbatim; [`sanitize`] holds the redaction policy applied to any
//! message before it leaves the process.

pub mod errors;
pub mod sanitize;

pub use errors::{ErrorKind, TailorError, TailorResult};
pub use sanitize::{sanitize_message, SanitizeMode};
