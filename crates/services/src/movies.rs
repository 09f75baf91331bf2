//! Movie CRUD, querying, and summary counts.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use catalog::constants::{
    MAX_GENRE_LENGTH, MAX_RELEASE_YEAR, MAX_TITLE_LENGTH, MIN_RELEASE_YEAR,
};
use catalog::types::{Movie, MovieId, PersonId};
use catalog::CatalogStore;
use query::filters::MovieFilter;
use query::page::{paginate, PageRequest};
use query::sort::{sort_movies, SortOrder};
use query::aggregate::count_by;

use crate::error::{Result, ServiceError};
use crate::records::MovieRecord;

/// Partial movie update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub director_id: Option<PersonId>,
    pub actor_ids: Option<Vec<PersonId>>,
}

/// Service for movies: create/read/update/delete plus the query pipeline
/// (sort → filter → paginate) and grouped counts.
#[derive(Debug, Clone)]
pub struct MovieService {
    store: Arc<RwLock<CatalogStore>>,
}

impl MovieService {
    pub fn new(store: Arc<RwLock<CatalogStore>>) -> Self {
        Self { store }
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and store a new movie; the id is assigned by the store.
    pub fn create(&self, movie: Movie) -> Result<Movie> {
        let mut store = self.write();
        validate_movie(&movie, &store)?;
        Ok(store.create_movie(movie))
    }

    /// Fetch one movie by id
    pub fn find_by_id(&self, id: MovieId) -> Result<Movie> {
        check_id(id)?;
        self.read()
            .get_movie(id)
            .cloned()
            .ok_or(ServiceError::NotFound { entity: "Movie", id })
    }

    /// Fetch one movie with its director and cast resolved
    pub fn find_record_by_id(&self, id: MovieId) -> Result<MovieRecord> {
        check_id(id)?;
        let store = self.read();
        let movie = store
            .get_movie(id)
            .cloned()
            .ok_or(ServiceError::NotFound { entity: "Movie", id })?;
        record_for(&store, movie)
    }

    /// Apply a partial update; only the fields present in the patch change.
    pub fn update(&self, id: MovieId, patch: MoviePatch) -> Result<Movie> {
        check_id(id)?;
        let mut store = self.write();
        let mut movie = store
            .get_movie(id)
            .cloned()
            .ok_or(ServiceError::NotFound { entity: "Movie", id })?;

        if let Some(title) = patch.title {
            movie.title = title;
        }
        if let Some(genre) = patch.genre {
            movie.genre = genre;
        }
        if let Some(year) = patch.release_year {
            movie.release_year = year;
        }
        if let Some(director_id) = patch.director_id {
            movie.director_id = director_id;
        }
        if let Some(actor_ids) = patch.actor_ids {
            movie.actor_ids = actor_ids;
        }

        validate_movie(&movie, &store)?;
        store.insert_movie(movie.clone());
        Ok(movie)
    }

    /// Delete a movie by id
    pub fn delete_by_id(&self, id: MovieId) -> Result<()> {
        check_id(id)?;
        self.write()
            .remove_movie(id)
            .map(|_| ())
            .ok_or(ServiceError::NotFound { entity: "Movie", id })
    }

    /// Run the query pipeline and resolve the selected page to records.
    pub fn find_all(
        &self,
        filter: &MovieFilter,
        order: &SortOrder,
        page: &PageRequest,
    ) -> Result<Vec<MovieRecord>> {
        let store = self.read();
        let mut movies = store.movies();
        let total = movies.len();

        sort_movies(&mut movies, order);
        let selected: Vec<Movie> = paginate(filter.apply(movies.into_iter()), page).collect();
        debug!(total, selected = selected.len(), "movie query");

        selected
            .into_iter()
            .map(|movie| record_for(&store, movie))
            .collect()
    }

    /// Count the movies matching a filter, ignoring pagination.
    pub fn count(&self, filter: &MovieFilter) -> u64 {
        let movies = self.read().movies();
        filter.apply(movies.into_iter()).count() as u64
    }

    /// Movie count per distinct genre
    pub fn count_by_genre(&self) -> Vec<(String, u64)> {
        count_by(&self.read().movies(), |m| m.genre.clone())
    }

    /// Movie count per release year
    pub fn count_by_release_year(&self) -> Vec<(i32, u64)> {
        count_by(&self.read().movies(), |m| m.release_year)
    }

    /// Movie count per director
    pub fn count_by_director(&self) -> Vec<(PersonId, u64)> {
        count_by(&self.read().movies(), |m| m.director_id)
    }
}

fn check_id(id: i64) -> Result<()> {
    if id < 0 {
        return Err(ServiceError::Invalid("Id must not be negative".to_string()));
    }
    Ok(())
}

fn record_for(store: &CatalogStore, movie: Movie) -> Result<MovieRecord> {
    let director = store
        .get_person(movie.director_id)
        .cloned()
        .ok_or(ServiceError::NotFound {
            entity: "Person",
            id: movie.director_id,
        })?;
    let actors = movie
        .actor_ids
        .iter()
        .map(|&actor_id| {
            store
                .get_person(actor_id)
                .cloned()
                .ok_or(ServiceError::NotFound {
                    entity: "Person",
                    id: actor_id,
                })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(MovieRecord {
        movie,
        director,
        actors,
    })
}

/// Entity-level validation for create and update.
///
/// References must resolve against the store: a movie naming a missing
/// director or actor would break the invariant the loader establishes.
fn validate_movie(movie: &Movie, store: &CatalogStore) -> Result<()> {
    if movie.title.trim().is_empty() {
        return Err(ServiceError::Invalid("Title cannot be blank".to_string()));
    }
    if movie.title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ServiceError::Invalid(format!(
            "Maximum title length is {MAX_TITLE_LENGTH}"
        )));
    }
    if movie.genre.trim().is_empty() {
        return Err(ServiceError::Invalid("Genre cannot be blank".to_string()));
    }
    if movie.genre.chars().count() > MAX_GENRE_LENGTH {
        return Err(ServiceError::Invalid(format!(
            "Maximum genre length is {MAX_GENRE_LENGTH}"
        )));
    }
    if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&movie.release_year) {
        return Err(ServiceError::Invalid(format!(
            "Release year must be between {MIN_RELEASE_YEAR} and {MAX_RELEASE_YEAR}"
        )));
    }
    if movie.director_id < 0 {
        return Err(ServiceError::Invalid(
            "Director id must not be negative".to_string(),
        ));
    }
    if store.get_person(movie.director_id).is_none() {
        return Err(ServiceError::NotFound {
            entity: "Person",
            id: movie.director_id,
        });
    }
    if movie.actor_ids.is_empty() {
        return Err(ServiceError::Invalid(
            "At least one actor id is required".to_string(),
        ));
    }
    for &actor_id in &movie.actor_ids {
        if actor_id < 0 {
            return Err(ServiceError::Invalid(
                "Actor id must not be negative".to_string(),
            ));
        }
        if store.get_person(actor_id).is_none() {
            return Err(ServiceError::NotFound {
                entity: "Person",
                id: actor_id,
            });
        }
    }
    Ok(())
}
