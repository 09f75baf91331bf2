//! # Services Crate
//!
//! Per-resource services for the ReelVault catalog. Each service owns a
//! shared handle to the [`catalog::CatalogStore`] and runs the fixed query
//! pipeline (sort, then filter, then paginate) over store snapshots,
//! plus entity-level validation for create and update.

pub mod error;
pub mod movies;
pub mod persons;
pub mod records;
pub mod reviews;

pub use error::{Result, ServiceError};
pub use movies::{MoviePatch, MovieService};
pub use persons::{PersonPatch, PersonService};
pub use records::{MovieRecord, PersonRecord};
pub use reviews::{ReviewPatch, ReviewService};
