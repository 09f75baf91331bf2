//! Domain limits shared across the workspace.
//!
//! Every validation rule reads its bound from here; no other module may
//! hard-code one of these values.

/// Maximum length of a movie title, in characters
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of a genre name, in characters
pub const MAX_GENRE_LENGTH: usize = 45;

/// Maximum length of a person's first name, in characters
pub const MAX_FIRST_NAME_LENGTH: usize = 64;

/// Maximum length of a person's last name, in characters
pub const MAX_LAST_NAME_LENGTH: usize = 64;

/// Maximum length of a review text, in characters
pub const MAX_REVIEW_LENGTH: usize = 255;

/// Earliest accepted release year (the Lumière brothers' first screening)
pub const MIN_RELEASE_YEAR: i32 = 1895;

/// Latest accepted release year
pub const MAX_RELEASE_YEAR: i32 = 9999;

/// Lowest accepted review rating
pub const MIN_RATING: f32 = 1.0;

/// Highest accepted review rating
pub const MAX_RATING: f32 = 10.0;

/// Page number used when the caller supplies none (zero-based)
pub const DEFAULT_PAGE: usize = 0;

/// Page size used when the caller supplies none
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Properties movies may be sorted by
pub const MOVIE_SORT_PROPERTIES: &[&str] = &["id", "title", "releaseYear", "genre", "directorId"];

/// Properties persons may be sorted by
pub const PERSON_SORT_PROPERTIES: &[&str] = &["id", "firstName", "lastName", "birthDate"];

/// Properties reviews may be sorted by
pub const REVIEW_SORT_PROPERTIES: &[&str] = &["id", "dateTime", "rating", "movieId"];
