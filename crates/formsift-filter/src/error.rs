//! Error types for the filter crate.
//!
//! Evaluation itself never fails: unknown question types, unknown conditions
//! and values that cannot be compared are reported as diagnostics. Errors are
//! reserved for serialized input that does not have the documented shape.

use thiserror::Error;

/// Errors raised when decoding serialized filter or submission documents.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The filter clause list is not a JSON array of `{id, condition, value}`.
    #[error("invalid filters format: {0}")]
    InvalidFilters(#[source] serde_json::Error),

    /// The submissions document is neither a responses envelope nor a list of submissions.
    #[error("invalid submissions document: {0}")]
    InvalidResponses(#[source] serde_json::Error),
}

/// Result type for filter crate operations.
pub type Result<T> = std::result::Result<T, FilterError>;
