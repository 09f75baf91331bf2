//! Result records assembled by the services.

use catalog::types::{Movie, Person, PersonId};
use serde::Serialize;

/// A movie with its director and cast resolved to full persons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub movie: Movie,
    pub director: Person,
    pub actors: Vec<Person>,
}

/// A person with how many movies they directed and acted in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonRecord {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub directed: u64,
    pub acted: u64,
}
