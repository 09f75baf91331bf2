//! Core domain types for the movie catalog.
//!
//! Ids are signed 64-bit like the database bigints they mirror; validation
//! layers reject negative values rather than the type system, so a bad id
//! coming in over the wire surfaces as an error, not a parse failure.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Unique identifier for a movie
pub type MovieId = i64;

/// Unique identifier for a person (director or actor)
pub type PersonId = i64;

/// Unique identifier for a review
pub type ReviewId = i64;

/// A movie in the catalog.
///
/// `genre` is a free-form string rather than an enum: the catalog accepts
/// whatever genres the data source carries, bounded only by
/// [`crate::constants::MAX_GENRE_LENGTH`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    pub release_year: i32,
    pub director_id: PersonId,
    /// Everyone credited as an actor. At least one entry on a valid movie.
    pub actor_ids: Vec<PersonId>,
}

/// A person referenced by movies as director or actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

/// A single review of a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub movie_id: MovieId,
    /// Rating value from 1.0 to 10.0
    pub rating: f32,
    pub date_time: NaiveDateTime,
    pub text: String,
}
