//! Error types for document store operations.
//!
//! The store prefers silent, safe no-ops over errors: unknown ids are
//! skipped, out-of-range values are clamped, and undo/redo on an empty
//! stack returns `None`. Only the cases a caller must react to are
//! surfaced as distinct errors.

use crate::element::ElementId;
use thiserror::Error;

/// Errors surfaced by document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An element with this id already exists; the caller should
    /// regenerate the id before retrying.
    #[error("element id already exists: {0}")]
    DuplicateId(ElementId),
    /// The operation needs more targets than it was given
    /// (grouping needs 2, distribution needs 3).
    #[error("operation requires at least {required} elements, got {actual}")]
    InvalidArity { required: usize, actual: usize },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
