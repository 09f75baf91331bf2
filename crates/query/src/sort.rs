//! Sort-order validation and entity comparators.
//!
//! A sort request is validated before anything else in the pipeline runs: a
//! malformed request must fail the whole query, never silently fall back to
//! a default order.

use std::cmp::Ordering;

use catalog::types::{Movie, Person, Review};

use crate::error::{QueryError, Result};

/// Direction of a sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse a direction token, case-insensitively.
    ///
    /// Accepts `asc`/`ascending` and `desc`/`descending`; anything else is
    /// an [`QueryError::InvalidSortOrder`] naming the token.
    pub fn parse(token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(QueryError::InvalidSortOrder(token.to_string())),
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// A validated (property, direction) pair.
///
/// Construction is the only place validation happens; a `SortOrder` that
/// exists is safe to sort by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    property: String,
    direction: SortDirection,
}

impl SortOrder {
    /// Validate caller-supplied sort tokens against a property allow-list.
    ///
    /// `tokens[0]` is the property, optional `tokens[1]` the direction
    /// (ascending when omitted). The direction token is parsed before the
    /// property is checked, so `("genre", "UP")` fails on the direction.
    pub fn parse(tokens: &[&str], allowed: &[&str]) -> Result<Self> {
        let property = tokens
            .first()
            .ok_or_else(|| QueryError::InvalidSortProperty(String::new()))?;
        let direction = match tokens.get(1) {
            Some(token) => SortDirection::parse(token)?,
            None => SortDirection::Ascending,
        };
        if !allowed.contains(property) {
            return Err(QueryError::InvalidSortProperty(property.to_string()));
        }
        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

// Comparators for every allow-listed property. An unknown property compares
// everything equal; it cannot be reached through a validated SortOrder.

/// Sort movies in place by a validated order
pub fn sort_movies(movies: &mut [Movie], order: &SortOrder) {
    movies.sort_by(|a, b| {
        let ordering = match order.property() {
            "id" => a.id.cmp(&b.id),
            "title" => a.title.cmp(&b.title),
            "releaseYear" => a.release_year.cmp(&b.release_year),
            "genre" => a.genre.cmp(&b.genre),
            "directorId" => a.director_id.cmp(&b.director_id),
            _ => Ordering::Equal,
        };
        order.direction().apply(ordering)
    });
}

/// Sort persons in place by a validated order
pub fn sort_persons(persons: &mut [Person], order: &SortOrder) {
    persons.sort_by(|a, b| {
        let ordering = match order.property() {
            "id" => a.id.cmp(&b.id),
            "firstName" => a.first_name.cmp(&b.first_name),
            "lastName" => a.last_name.cmp(&b.last_name),
            "birthDate" => a.birth_date.cmp(&b.birth_date),
            _ => Ordering::Equal,
        };
        order.direction().apply(ordering)
    });
}

/// Sort reviews in place by a validated order
pub fn sort_reviews(reviews: &mut [Review], order: &SortOrder) {
    reviews.sort_by(|a, b| {
        let ordering = match order.property() {
            "id" => a.id.cmp(&b.id),
            "dateTime" => a.date_time.cmp(&b.date_time),
            "rating" => a.rating.partial_cmp(&b.rating).unwrap_or(Ordering::Equal),
            "movieId" => a.movie_id.cmp(&b.movie_id),
            _ => Ordering::Equal,
        };
        order.direction().apply(ordering)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::constants::MOVIE_SORT_PROPERTIES;

    #[test]
    fn test_direction_defaults_to_ascending() {
        let order = SortOrder::parse(&["id"], MOVIE_SORT_PROPERTIES).unwrap();
        assert_eq!(order.direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_direction_parses_case_insensitively() {
        let order = SortOrder::parse(&["title", "DESC"], MOVIE_SORT_PROPERTIES).unwrap();
        assert_eq!(order.direction(), SortDirection::Descending);

        let order = SortOrder::parse(&["title", "Ascending"], MOVIE_SORT_PROPERTIES).unwrap();
        assert_eq!(order.direction(), SortDirection::Ascending);
    }

    #[test]
    fn test_unknown_direction_fails() {
        let result = SortOrder::parse(&["id", "UP"], MOVIE_SORT_PROPERTIES);
        assert_eq!(result, Err(QueryError::InvalidSortOrder("UP".to_string())));
    }

    #[test]
    fn test_unknown_property_fails() {
        let result = SortOrder::parse(&["rating"], MOVIE_SORT_PROPERTIES);
        assert_eq!(
            result,
            Err(QueryError::InvalidSortProperty("rating".to_string()))
        );
    }

    #[test]
    fn test_direction_checked_before_property() {
        // both tokens are bad; the direction failure wins
        let result = SortOrder::parse(&["rating", "UP"], MOVIE_SORT_PROPERTIES);
        assert_eq!(result, Err(QueryError::InvalidSortOrder("UP".to_string())));
    }

    #[test]
    fn test_sort_movies_by_year_descending() {
        let mut movies = vec![
            movie_with_year(1, 1972),
            movie_with_year(2, 2008),
            movie_with_year(3, 1994),
        ];
        let order = SortOrder::parse(&["releaseYear", "desc"], MOVIE_SORT_PROPERTIES).unwrap();

        sort_movies(&mut movies, &order);

        let years: Vec<i32> = movies.iter().map(|m| m.release_year).collect();
        assert_eq!(years, vec![2008, 1994, 1972]);
    }

    fn movie_with_year(id: i64, year: i32) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            genre: "Drama".to_string(),
            release_year: year,
            director_id: 1,
            actor_ids: vec![1],
        }
    }
}
