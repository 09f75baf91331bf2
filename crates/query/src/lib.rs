//! # Query Crate
//!
//! The generic filtering / sorting / pagination / aggregation engine behind
//! every catalog resource.
//!
//! ## Main Components
//!
//! - **filters**: Per-resource filters built through validating builders
//! - **sort**: Sort-order validation against per-resource allow-lists
//! - **page**: Offset/limit windowing
//! - **aggregate**: Grouped counts and rating-bucket summaries
//! - **error**: `QueryError` for everything malformed
//!
//! ## Pipeline order
//!
//! Stages run in a fixed order: **sort → filter → skip → take**. The
//! collection is sorted before filtering so that shrinking the entity set
//! never invalidates the page window. Sort validation happens before any
//! of it; a bad sort request fails the query outright.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::constants::MOVIE_SORT_PROPERTIES;
//! use query::filters::MovieFilter;
//! use query::page::{paginate, PageRequest};
//! use query::sort::{sort_movies, SortOrder};
//!
//! let order = SortOrder::parse(&["title", "asc"], MOVIE_SORT_PROPERTIES)?;
//! let filter = MovieFilter::builder()
//!     .with_genres(Some(vec!["Crime".to_string()]))?
//!     .build();
//!
//! sort_movies(&mut movies, &order);
//! let page: Vec<_> = paginate(filter.apply(movies.into_iter()), &PageRequest::default()).collect();
//! ```

pub mod aggregate;
pub mod error;
pub mod filters;
pub mod page;
pub mod sort;

// Re-export main types
pub use aggregate::{count_by, count_by_rating_bucket, RatingBucket};
pub use error::{QueryError, Result};
pub use filters::{MovieFilter, PersonFilter, ReviewFilter};
pub use page::{paginate, PageRequest};
pub use sort::{SortDirection, SortOrder};
