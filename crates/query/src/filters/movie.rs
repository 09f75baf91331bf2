//! Movie filter: title substring, genre set, release year, director,
//! actor-set containment.

use catalog::constants::{
    MAX_GENRE_LENGTH, MAX_RELEASE_YEAR, MAX_TITLE_LENGTH, MIN_RELEASE_YEAR,
};
use catalog::types::{Movie, PersonId};

use crate::error::{QueryError, Result};
use crate::filters::{check_id, check_length};

/// Immutable set of optional movie criteria.
///
/// ## Matching semantics
/// - `title`: case-insensitive substring
/// - `genres`: case-insensitive equality against ANY of the given genres
/// - `release_year`, `director_id`: exact equality
/// - `actor_ids`: the movie's actor set must contain EVERY requested id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieFilter {
    title: Option<String>,
    genres: Option<Vec<String>>,
    release_year: Option<i32>,
    director_id: Option<PersonId>,
    actor_ids: Option<Vec<PersonId>>,
}

impl MovieFilter {
    /// Start building a filter
    pub fn builder() -> MovieFilterBuilder {
        MovieFilterBuilder::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn genres(&self) -> Option<&[String]> {
        self.genres.as_deref()
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_year
    }

    pub fn director_id(&self) -> Option<PersonId> {
        self.director_id
    }

    pub fn actor_ids(&self) -> Option<&[PersonId]> {
        self.actor_ids.as_deref()
    }

    /// Does this movie satisfy every present criterion?
    pub fn matches(&self, movie: &Movie) -> bool {
        self.title
            .as_ref()
            .is_none_or(|t| movie.title.to_lowercase().contains(&t.to_lowercase()))
            && self
                .genres
                .as_ref()
                .is_none_or(|gs| gs.iter().any(|g| movie.genre.eq_ignore_ascii_case(g)))
            && self.release_year.is_none_or(|y| movie.release_year == y)
            && self.director_id.is_none_or(|d| movie.director_id == d)
            && self
                .actor_ids
                .as_ref()
                .is_none_or(|ids| ids.iter().all(|id| movie.actor_ids.contains(id)))
    }

    /// Lazily select the movies satisfying every present criterion.
    ///
    /// Never mutates, never errors; with no criteria set this is the
    /// identity over `input`.
    pub fn apply<I>(&self, input: I) -> impl Iterator<Item = Movie>
    where
        I: Iterator<Item = Movie>,
    {
        input.filter(move |movie| self.matches(movie))
    }
}

/// Builder that validates each criterion as it is supplied.
///
/// Passing `None` to any method leaves the field unconstrained.
#[derive(Debug, Clone, Default)]
pub struct MovieFilterBuilder {
    filter: MovieFilter,
}

impl MovieFilterBuilder {
    pub fn with_title(mut self, title: Option<String>) -> Result<Self> {
        if let Some(ref title) = title {
            check_length("title", title, MAX_TITLE_LENGTH)?;
        }
        self.filter.title = title;
        Ok(self)
    }

    pub fn with_genres(mut self, genres: Option<Vec<String>>) -> Result<Self> {
        if let Some(ref genres) = genres {
            for genre in genres {
                check_length("genre", genre, MAX_GENRE_LENGTH)?;
            }
        }
        self.filter.genres = genres;
        Ok(self)
    }

    pub fn with_release_year(mut self, release_year: Option<i32>) -> Result<Self> {
        if let Some(year) = release_year {
            if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year) {
                return Err(QueryError::Validation {
                    field: "releaseYear",
                    reason: format!(
                        "must be between {MIN_RELEASE_YEAR} and {MAX_RELEASE_YEAR}"
                    ),
                });
            }
        }
        self.filter.release_year = release_year;
        Ok(self)
    }

    pub fn with_director_id(mut self, director_id: Option<PersonId>) -> Result<Self> {
        if let Some(id) = director_id {
            check_id("directorId", id)?;
        }
        self.filter.director_id = director_id;
        Ok(self)
    }

    pub fn with_actor_ids(mut self, actor_ids: Option<Vec<PersonId>>) -> Result<Self> {
        if let Some(ref ids) = actor_ids {
            for &id in ids {
                check_id("actorIds", id)?;
            }
        }
        self.filter.actor_ids = actor_ids;
        Ok(self)
    }

    /// Freeze the accumulated criteria
    pub fn build(self) -> MovieFilter {
        self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_movie(id: i64, title: &str, genre: &str, year: i32) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            genre: genre.to_string(),
            release_year: year,
            director_id: 1,
            actor_ids: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let filter = MovieFilter::builder().build();
        let movies = vec![
            test_movie(1, "Heat", "Crime", 1995),
            test_movie(2, "Alien", "Horror", 1979),
        ];

        let result: Vec<Movie> = filter.apply(movies.clone().into_iter()).collect();
        assert_eq!(result, movies);
    }

    #[test]
    fn test_title_substring_case_insensitive() {
        let filter = MovieFilter::builder()
            .with_title(Some("ALIE".to_string()))
            .unwrap()
            .build();

        assert!(filter.matches(&test_movie(1, "Alien", "Horror", 1979)));
        assert!(!filter.matches(&test_movie(2, "Heat", "Crime", 1995)));
    }

    #[test]
    fn test_genre_matches_any_of_set() {
        let filter = MovieFilter::builder()
            .with_genres(Some(vec!["action".to_string(), "CRIME".to_string()]))
            .unwrap()
            .build();

        assert!(filter.matches(&test_movie(1, "Heat", "Crime", 1995)));
        assert!(!filter.matches(&test_movie(2, "Alien", "Horror", 1979)));
    }

    #[test]
    fn test_actor_ids_superset_rule() {
        let movie = test_movie(1, "Heat", "Crime", 1995); // actors {1, 2, 3}

        let subset = MovieFilter::builder()
            .with_actor_ids(Some(vec![1, 2]))
            .unwrap()
            .build();
        assert!(subset.matches(&movie));

        let not_subset = MovieFilter::builder()
            .with_actor_ids(Some(vec![1, 4]))
            .unwrap()
            .build();
        assert!(!not_subset.matches(&movie));
    }

    #[test]
    fn test_title_too_long_rejected() {
        let result = MovieFilter::builder().with_title(Some("x".repeat(256)));
        assert!(matches!(
            result,
            Err(QueryError::Validation { field: "title", .. })
        ));
    }

    #[test]
    fn test_year_out_of_range_rejected() {
        let result = MovieFilter::builder().with_release_year(Some(1894));
        assert!(matches!(
            result,
            Err(QueryError::Validation { field: "releaseYear", .. })
        ));
    }

    #[test]
    fn test_negative_director_id_rejected() {
        let result = MovieFilter::builder().with_director_id(Some(-1));
        assert!(matches!(
            result,
            Err(QueryError::Validation { field: "directorId", .. })
        ));
    }

    #[test]
    fn test_none_is_no_op() {
        let filter = MovieFilter::builder()
            .with_title(None)
            .unwrap()
            .with_release_year(None)
            .unwrap()
            .build();
        assert_eq!(filter, MovieFilter::default());
    }

    #[test]
    fn test_round_trip_accessors() {
        let filter = MovieFilter::builder()
            .with_title(Some("Heat".to_string()))
            .unwrap()
            .with_genres(Some(vec!["Crime".to_string()]))
            .unwrap()
            .with_release_year(Some(1995))
            .unwrap()
            .with_director_id(Some(4))
            .unwrap()
            .with_actor_ids(Some(vec![5, 6]))
            .unwrap()
            .build();

        assert_eq!(filter.title(), Some("Heat"));
        assert_eq!(filter.genres(), Some(&["Crime".to_string()][..]));
        assert_eq!(filter.release_year(), Some(1995));
        assert_eq!(filter.director_id(), Some(4));
        assert_eq!(filter.actor_ids(), Some(&[5, 6][..]));
    }
}
