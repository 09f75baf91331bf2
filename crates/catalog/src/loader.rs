//! Seed loading for the catalog store.
//!
//! A seed file is a single JSON document:
//!
//! ```json
//! {
//!   "movies": [...],
//!   "people": [...],
//!   "reviews": [...]
//! }
//! ```
//!
//! Loading inserts everything, then sweeps the store for dangling
//! references and out-of-range ratings before handing it back.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;

use crate::constants::{MAX_RATING, MIN_RATING};
use crate::error::{CatalogError, Result};
use crate::store::CatalogStore;
use crate::types::{Movie, Person, Review};

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    movies: Vec<Movie>,
    #[serde(default)]
    people: Vec<Person>,
    #[serde(default)]
    reviews: Vec<Review>,
}

impl CatalogStore {
    /// Load a catalog from a JSON seed file and validate it.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let seed: SeedFile = serde_json::from_reader(BufReader::new(file))?;
        Self::from_seed(seed.movies, seed.people, seed.reviews)
    }

    /// Build a validated store from already-parsed entities.
    pub fn from_seed(
        movies: Vec<Movie>,
        people: Vec<Person>,
        reviews: Vec<Review>,
    ) -> Result<Self> {
        let mut store = CatalogStore::new();
        for person in people {
            store.insert_person(person);
        }
        for movie in movies {
            store.insert_movie(movie);
        }
        for review in reviews {
            store.insert_review(review);
        }
        store.validate()?;
        Ok(store)
    }

    /// Check referential integrity and rating bounds.
    ///
    /// - every `movie.director_id` and every entry of `movie.actor_ids`
    ///   must name an existing person
    /// - every `review.movie_id` must name an existing movie
    /// - every rating must lie in `[MIN_RATING, MAX_RATING]`
    pub fn validate(&self) -> Result<()> {
        self.movies.par_iter().try_for_each(|(_, movie)| {
            if !self.people.contains_key(&movie.director_id) {
                return Err(CatalogError::MissingReference {
                    entity: "Person",
                    id: movie.director_id,
                });
            }
            for &actor_id in &movie.actor_ids {
                if !self.people.contains_key(&actor_id) {
                    return Err(CatalogError::MissingReference {
                        entity: "Person",
                        id: actor_id,
                    });
                }
            }
            Ok(())
        })?;

        self.reviews.par_iter().try_for_each(|(_, review)| {
            if !self.movies.contains_key(&review.movie_id) {
                return Err(CatalogError::MissingReference {
                    entity: "Movie",
                    id: review.movie_id,
                });
            }
            if review.rating < MIN_RATING || review.rating > MAX_RATING {
                return Err(CatalogError::InvalidValue {
                    field: "rating",
                    value: review.rating.to_string(),
                });
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn person(id: i64) -> Person {
        Person {
            id,
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
        }
    }

    fn movie(id: i64, director_id: i64, actor_ids: Vec<i64>) -> Movie {
        Movie {
            id,
            title: "A Movie".to_string(),
            genre: "Drama".to_string(),
            release_year: 1999,
            director_id,
            actor_ids,
        }
    }

    fn review(id: i64, movie_id: i64, rating: f32) -> Review {
        Review {
            id,
            movie_id,
            rating,
            date_time: NaiveDate::from_ymd_opt(2020, 6, 15)
                .unwrap()
                .and_hms_opt(20, 30, 0)
                .unwrap(),
            text: "fine".to_string(),
        }
    }

    #[test]
    fn test_valid_seed() {
        let store = CatalogStore::from_seed(
            vec![movie(1, 1, vec![2])],
            vec![person(1), person(2)],
            vec![review(1, 1, 8.0)],
        )
        .unwrap();
        assert_eq!(store.counts(), (1, 2, 1));
    }

    #[test]
    fn test_dangling_director() {
        let result = CatalogStore::from_seed(vec![movie(1, 99, vec![2])], vec![person(2)], vec![]);
        assert!(matches!(
            result,
            Err(CatalogError::MissingReference { entity: "Person", id: 99 })
        ));
    }

    #[test]
    fn test_dangling_actor() {
        let result = CatalogStore::from_seed(vec![movie(1, 1, vec![7])], vec![person(1)], vec![]);
        assert!(matches!(
            result,
            Err(CatalogError::MissingReference { entity: "Person", id: 7 })
        ));
    }

    #[test]
    fn test_dangling_review_movie() {
        let result = CatalogStore::from_seed(vec![], vec![], vec![review(1, 5, 6.0)]);
        assert!(matches!(
            result,
            Err(CatalogError::MissingReference { entity: "Movie", id: 5 })
        ));
    }

    #[test]
    fn test_out_of_range_rating() {
        let result = CatalogStore::from_seed(
            vec![movie(1, 1, vec![1])],
            vec![person(1)],
            vec![review(1, 1, 11.0)],
        );
        assert!(matches!(
            result,
            Err(CatalogError::InvalidValue { field: "rating", .. })
        ));
    }
}
