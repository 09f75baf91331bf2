//! Per-resource filters with validating builders.
//!
//! Each filter is an immutable bag of optional criteria. Builders validate
//! every criterion the moment it is supplied, so a filter that exists is a
//! filter that is valid; applying one can no longer fail.
//!
//! An absent criterion is an identity predicate. Present criteria combine
//! with logical AND.

pub mod movie;
pub mod person;
pub mod review;

// Re-export for convenience
pub use movie::{MovieFilter, MovieFilterBuilder};
pub use person::{PersonFilter, PersonFilterBuilder};
pub use review::{ReviewFilter, ReviewFilterBuilder};

use chrono::{Local, NaiveDate, NaiveDateTime};

use catalog::constants::{MAX_RATING, MIN_RATING};

use crate::error::{QueryError, Result};

// Guard clauses shared by the builders. Each takes the wire-level field
// name so the error always points at the offending input.

pub(crate) fn check_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(QueryError::Validation {
            field,
            reason: format!("must be at most {max} characters"),
        });
    }
    Ok(())
}

pub(crate) fn check_id(field: &'static str, id: i64) -> Result<()> {
    if id < 0 {
        return Err(QueryError::Validation {
            field,
            reason: "must not be negative".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_rating(field: &'static str, rating: f32) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(QueryError::Validation {
            field,
            reason: format!("must be between {MIN_RATING} and {MAX_RATING}"),
        });
    }
    Ok(())
}

pub(crate) fn check_past_date(field: &'static str, date: NaiveDate) -> Result<()> {
    if date > Local::now().date_naive() {
        return Err(QueryError::Validation {
            field,
            reason: "must not be in the future".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_past_date_time(field: &'static str, date_time: NaiveDateTime) -> Result<()> {
    if date_time > Local::now().naive_local() {
        return Err(QueryError::Validation {
            field,
            reason: "must not be in the future".to_string(),
        });
    }
    Ok(())
}
