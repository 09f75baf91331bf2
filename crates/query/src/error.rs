//! Error types for the query crate.
//!
//! Everything here signals malformed input. Nothing is retryable, and an
//! empty result set is never an error.

use thiserror::Error;

/// Errors raised while building filters or validating sort requests
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// A filter criterion violates its domain constraint.
    ///
    /// Raised at build time, before any entity is touched, and always
    /// attributable to one named field.
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Sort direction token is neither ascending nor descending
    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),

    /// Sort property is not on the resource's allow-list
    #[error("Invalid sort property: {0}")]
    InvalidSortProperty(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, QueryError>;
