//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading or validating catalog data
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading a seed file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not valid JSON or does not match the expected shape
    #[error("Malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Referenced entity doesn't exist (e.g., review for a missing movie)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: &'static str, id: i64 },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
