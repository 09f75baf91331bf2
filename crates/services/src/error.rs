//! Error types for the services crate.

use query::QueryError;
use thiserror::Error;

/// Errors surfaced by the per-resource services
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Requested or referenced entity doesn't exist.
    ///
    /// An empty query result is NOT this error; zero matches is a normal
    /// outcome. NotFound means one specific id failed to resolve.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Entity-level validation failed on create or update
    #[error("{0}")]
    Invalid(String),

    /// Malformed filter, sort, or page input
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ServiceError>;
