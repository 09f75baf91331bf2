//! In-memory catalog store.
//!
//! `CatalogStore` owns the primary entity maps and hands out owned
//! snapshots. Query pipelines iterate over a snapshot, so a store mutated
//! between requests never invalidates an iteration already in flight.

use std::collections::HashMap;

use crate::types::{Movie, MovieId, Person, PersonId, Review, ReviewId};

/// Primary store for movies, people, and reviews.
///
/// Ids are assigned identity-style on create: one greater than the highest
/// id ever inserted for that resource.
#[derive(Debug, Default)]
pub struct CatalogStore {
    pub(crate) movies: HashMap<MovieId, Movie>,
    pub(crate) people: HashMap<PersonId, Person>,
    pub(crate) reviews: HashMap<ReviewId, Review>,

    next_movie_id: MovieId,
    next_person_id: PersonId,
    next_review_id: ReviewId,
}

impl CatalogStore {
    /// Creates a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    // Insertions keep the id the entity carries; used by the loader and by
    // updates. Creations assign a fresh id.

    /// Insert a movie, keeping its id
    pub fn insert_movie(&mut self, movie: Movie) {
        self.next_movie_id = self.next_movie_id.max(movie.id + 1);
        self.movies.insert(movie.id, movie);
    }

    /// Insert a person, keeping their id
    pub fn insert_person(&mut self, person: Person) {
        self.next_person_id = self.next_person_id.max(person.id + 1);
        self.people.insert(person.id, person);
    }

    /// Insert a review, keeping its id
    pub fn insert_review(&mut self, review: Review) {
        self.next_review_id = self.next_review_id.max(review.id + 1);
        self.reviews.insert(review.id, review);
    }

    /// Insert a movie under a freshly assigned id, returning it
    pub fn create_movie(&mut self, mut movie: Movie) -> Movie {
        movie.id = self.next_movie_id.max(1);
        self.insert_movie(movie.clone());
        movie
    }

    /// Insert a person under a freshly assigned id, returning them
    pub fn create_person(&mut self, mut person: Person) -> Person {
        person.id = self.next_person_id.max(1);
        self.insert_person(person.clone());
        person
    }

    /// Insert a review under a freshly assigned id, returning it
    pub fn create_review(&mut self, mut review: Review) -> Review {
        review.id = self.next_review_id.max(1);
        self.insert_review(review.clone());
        review
    }

    /// Get a movie by id
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Get a person by id
    pub fn get_person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    /// Get a review by id
    pub fn get_review(&self, id: ReviewId) -> Option<&Review> {
        self.reviews.get(&id)
    }

    /// Remove a movie, returning it if it existed
    pub fn remove_movie(&mut self, id: MovieId) -> Option<Movie> {
        self.movies.remove(&id)
    }

    /// Remove a person, returning them if they existed
    pub fn remove_person(&mut self, id: PersonId) -> Option<Person> {
        self.people.remove(&id)
    }

    /// Remove a review, returning it if it existed
    pub fn remove_review(&mut self, id: ReviewId) -> Option<Review> {
        self.reviews.remove(&id)
    }

    /// Remove every review of the given movie, returning how many went away
    pub fn remove_reviews_by_movie(&mut self, movie_id: MovieId) -> usize {
        let before = self.reviews.len();
        self.reviews.retain(|_, review| review.movie_id != movie_id);
        before - self.reviews.len()
    }

    // Snapshot accessors. Owned clones, deliberately: a query pipeline must
    // keep working over the collection it was handed even if the store is
    // mutated before the pipeline finishes.

    /// Snapshot of all movies (unordered)
    pub fn movies(&self) -> Vec<Movie> {
        self.movies.values().cloned().collect()
    }

    /// Snapshot of all people (unordered)
    pub fn people(&self) -> Vec<Person> {
        self.people.values().cloned().collect()
    }

    /// Snapshot of all reviews (unordered)
    pub fn reviews(&self) -> Vec<Review> {
        self.reviews.values().cloned().collect()
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.movies.len(), self.people.len(), self.reviews.len())
    }
}
