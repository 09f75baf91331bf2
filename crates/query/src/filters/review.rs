//! Review filter: ids, text substring, rating (exact or ranged), timestamp
//! (exact or ranged).

use chrono::NaiveDateTime;

use catalog::constants::MAX_REVIEW_LENGTH;
use catalog::types::{MovieId, Review, ReviewId};

use crate::error::Result;
use crate::filters::{check_id, check_length, check_past_date_time, check_rating};

/// Immutable set of optional review criteria.
///
/// ## Matching semantics
/// - `id`, `movie_id`: exact equality
/// - `text`: case-insensitive substring
/// - `rating`: exact equality; `rating_from` / `rating_to` inclusive,
///   applied independently
/// - `date_time`: exact equality; `date_time_from` / `date_time_to`
///   inclusive, applied independently
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewFilter {
    id: Option<ReviewId>,
    movie_id: Option<MovieId>,
    text: Option<String>,
    rating: Option<f32>,
    rating_from: Option<f32>,
    rating_to: Option<f32>,
    date_time: Option<NaiveDateTime>,
    date_time_from: Option<NaiveDateTime>,
    date_time_to: Option<NaiveDateTime>,
}

impl ReviewFilter {
    /// Start building a filter
    pub fn builder() -> ReviewFilterBuilder {
        ReviewFilterBuilder::default()
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn movie_id(&self) -> Option<MovieId> {
        self.movie_id
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn rating(&self) -> Option<f32> {
        self.rating
    }

    pub fn rating_from(&self) -> Option<f32> {
        self.rating_from
    }

    pub fn rating_to(&self) -> Option<f32> {
        self.rating_to
    }

    pub fn date_time(&self) -> Option<NaiveDateTime> {
        self.date_time
    }

    pub fn date_time_from(&self) -> Option<NaiveDateTime> {
        self.date_time_from
    }

    pub fn date_time_to(&self) -> Option<NaiveDateTime> {
        self.date_time_to
    }

    /// Does this review satisfy every present criterion?
    pub fn matches(&self, review: &Review) -> bool {
        self.id.is_none_or(|id| review.id == id)
            && self.movie_id.is_none_or(|id| review.movie_id == id)
            && self
                .text
                .as_ref()
                .is_none_or(|t| review.text.to_lowercase().contains(&t.to_lowercase()))
            && self.rating.is_none_or(|r| review.rating == r)
            && self.rating_from.is_none_or(|r| review.rating >= r)
            && self.rating_to.is_none_or(|r| review.rating <= r)
            && self.date_time.is_none_or(|d| review.date_time == d)
            && self.date_time_from.is_none_or(|d| review.date_time >= d)
            && self.date_time_to.is_none_or(|d| review.date_time <= d)
    }

    /// Lazily select the reviews satisfying every present criterion.
    pub fn apply<I>(&self, input: I) -> impl Iterator<Item = Review>
    where
        I: Iterator<Item = Review>,
    {
        input.filter(move |review| self.matches(review))
    }
}

/// Builder that validates each criterion as it is supplied.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilterBuilder {
    filter: ReviewFilter,
}

impl ReviewFilterBuilder {
    pub fn with_id(mut self, id: Option<ReviewId>) -> Result<Self> {
        if let Some(id) = id {
            check_id("id", id)?;
        }
        self.filter.id = id;
        Ok(self)
    }

    pub fn with_movie_id(mut self, movie_id: Option<MovieId>) -> Result<Self> {
        if let Some(id) = movie_id {
            check_id("movieId", id)?;
        }
        self.filter.movie_id = movie_id;
        Ok(self)
    }

    pub fn with_text(mut self, text: Option<String>) -> Result<Self> {
        if let Some(ref text) = text {
            check_length("text", text, MAX_REVIEW_LENGTH)?;
        }
        self.filter.text = text;
        Ok(self)
    }

    pub fn with_rating(mut self, rating: Option<f32>) -> Result<Self> {
        if let Some(rating) = rating {
            check_rating("rating", rating)?;
        }
        self.filter.rating = rating;
        Ok(self)
    }

    pub fn with_rating_from(mut self, from: Option<f32>) -> Result<Self> {
        if let Some(rating) = from {
            check_rating("ratingFrom", rating)?;
        }
        self.filter.rating_from = from;
        Ok(self)
    }

    pub fn with_rating_to(mut self, to: Option<f32>) -> Result<Self> {
        if let Some(rating) = to {
            check_rating("ratingTo", rating)?;
        }
        self.filter.rating_to = to;
        Ok(self)
    }

    pub fn with_date_time(mut self, date_time: Option<NaiveDateTime>) -> Result<Self> {
        if let Some(dt) = date_time {
            check_past_date_time("dateTime", dt)?;
        }
        self.filter.date_time = date_time;
        Ok(self)
    }

    pub fn with_date_time_from(mut self, from: Option<NaiveDateTime>) -> Result<Self> {
        if let Some(dt) = from {
            check_past_date_time("fromDateTime", dt)?;
        }
        self.filter.date_time_from = from;
        Ok(self)
    }

    pub fn with_date_time_to(mut self, to: Option<NaiveDateTime>) -> Result<Self> {
        if let Some(dt) = to {
            check_past_date_time("toDateTime", dt)?;
        }
        self.filter.date_time_to = to;
        Ok(self)
    }

    /// Freeze the accumulated criteria
    pub fn build(self) -> ReviewFilter {
        self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use chrono::{Duration, Local, NaiveDate};

    fn test_review(id: i64, movie_id: i64, rating: f32, text: &str) -> Review {
        Review {
            id,
            movie_id,
            rating,
            date_time: NaiveDate::from_ymd_opt(2022, 9, 3)
                .unwrap()
                .and_hms_opt(18, 45, 0)
                .unwrap(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_text_substring_case_insensitive() {
        let filter = ReviewFilter::builder()
            .with_text(Some("MASTER".to_string()))
            .unwrap()
            .build();

        assert!(filter.matches(&test_review(1, 1, 9.0, "A masterpiece of tension")));
        assert!(!filter.matches(&test_review(2, 1, 4.0, "Forgettable")));
    }

    #[test]
    fn test_rating_range_is_inclusive() {
        let review = test_review(1, 1, 7.0, "Good");

        let filter = ReviewFilter::builder()
            .with_rating_from(Some(7.0))
            .unwrap()
            .with_rating_to(Some(7.0))
            .unwrap()
            .build();

        assert!(filter.matches(&review));
    }

    #[test]
    fn test_and_composition_equals_intersection() {
        let reviews = vec![
            test_review(1, 10, 8.0, "Great pacing"),
            test_review(2, 10, 3.0, "Great idea, poor pacing"),
            test_review(3, 11, 8.5, "Great cast"),
        ];

        let by_movie = ReviewFilter::builder()
            .with_movie_id(Some(10))
            .unwrap()
            .build();
        let by_rating = ReviewFilter::builder()
            .with_rating_from(Some(5.0))
            .unwrap()
            .build();
        let combined = ReviewFilter::builder()
            .with_movie_id(Some(10))
            .unwrap()
            .with_rating_from(Some(5.0))
            .unwrap()
            .build();

        let ids = |filter: &ReviewFilter| -> Vec<i64> {
            filter
                .apply(reviews.clone().into_iter())
                .map(|r| r.id)
                .collect()
        };

        let intersection: Vec<i64> = ids(&by_movie)
            .into_iter()
            .filter(|id| ids(&by_rating).contains(id))
            .collect();

        assert_eq!(ids(&combined), intersection);
        assert_eq!(ids(&combined), vec![1]);
    }

    #[test]
    fn test_rating_outside_domain_rejected() {
        let result = ReviewFilter::builder().with_rating(Some(0.5));
        assert!(matches!(
            result,
            Err(QueryError::Validation { field: "rating", .. })
        ));

        let result = ReviewFilter::builder().with_rating_to(Some(10.5));
        assert!(matches!(
            result,
            Err(QueryError::Validation { field: "ratingTo", .. })
        ));
    }

    #[test]
    fn test_future_date_time_rejected() {
        let tomorrow = Local::now().naive_local() + Duration::days(1);
        let result = ReviewFilter::builder().with_date_time_from(Some(tomorrow));
        assert!(matches!(
            result,
            Err(QueryError::Validation { field: "fromDateTime", .. })
        ));
    }

    #[test]
    fn test_round_trip_accessors() {
        let dt = NaiveDate::from_ymd_opt(2022, 9, 3)
            .unwrap()
            .and_hms_opt(18, 45, 0)
            .unwrap();
        let filter = ReviewFilter::builder()
            .with_id(Some(1))
            .unwrap()
            .with_movie_id(Some(2))
            .unwrap()
            .with_text(Some("tense".to_string()))
            .unwrap()
            .with_rating(Some(8.0))
            .unwrap()
            .with_date_time(Some(dt))
            .unwrap()
            .build();

        assert_eq!(filter.id(), Some(1));
        assert_eq!(filter.movie_id(), Some(2));
        assert_eq!(filter.text(), Some("tense"));
        assert_eq!(filter.rating(), Some(8.0));
        assert_eq!(filter.date_time(), Some(dt));
    }
}
