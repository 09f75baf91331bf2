//! Review CRUD, querying, and rating-bucket summaries.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use catalog::constants::{MAX_RATING, MAX_REVIEW_LENGTH, MIN_RATING};
use catalog::types::{MovieId, Review, ReviewId};
use catalog::CatalogStore;
use query::aggregate::{count_by_rating_bucket, RatingBucket};
use query::filters::ReviewFilter;
use query::page::{paginate, PageRequest};
use query::sort::{sort_reviews, SortOrder};

use crate::error::{Result, ServiceError};

/// Partial review update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub rating: Option<f32>,
    pub date_time: Option<NaiveDateTime>,
    pub text: Option<String>,
}

/// Service for reviews.
#[derive(Debug, Clone)]
pub struct ReviewService {
    store: Arc<RwLock<CatalogStore>>,
}

impl ReviewService {
    pub fn new(store: Arc<RwLock<CatalogStore>>) -> Self {
        Self { store }
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and store a new review; the id is assigned by the store.
    ///
    /// The reviewed movie must exist.
    pub fn create(&self, review: Review) -> Result<Review> {
        let mut store = self.write();
        if store.get_movie(review.movie_id).is_none() {
            return Err(ServiceError::NotFound {
                entity: "Movie",
                id: review.movie_id,
            });
        }
        validate_review(&review)?;
        Ok(store.create_review(review))
    }

    /// Fetch one review by id
    pub fn find_by_id(&self, id: ReviewId) -> Result<Review> {
        check_id(id)?;
        self.read()
            .get_review(id)
            .cloned()
            .ok_or(ServiceError::NotFound { entity: "Review", id })
    }

    /// Apply a partial update; only the fields present in the patch change.
    pub fn update(&self, id: ReviewId, patch: ReviewPatch) -> Result<Review> {
        check_id(id)?;
        let mut store = self.write();
        let mut review = store
            .get_review(id)
            .cloned()
            .ok_or(ServiceError::NotFound { entity: "Review", id })?;

        if let Some(rating) = patch.rating {
            review.rating = rating;
        }
        if let Some(date_time) = patch.date_time {
            review.date_time = date_time;
        }
        if let Some(text) = patch.text {
            review.text = text;
        }

        validate_review(&review)?;
        store.insert_review(review.clone());
        Ok(review)
    }

    /// Delete a review by id
    pub fn delete_by_id(&self, id: ReviewId) -> Result<()> {
        check_id(id)?;
        self.write()
            .remove_review(id)
            .map(|_| ())
            .ok_or(ServiceError::NotFound { entity: "Review", id })
    }

    /// Delete every review of a movie, returning how many went away.
    ///
    /// Zero is a normal outcome, not an error.
    pub fn delete_by_movie(&self, movie_id: MovieId) -> Result<usize> {
        check_id(movie_id)?;
        let removed = self.write().remove_reviews_by_movie(movie_id);
        debug!(movie_id, removed, "deleted reviews by movie");
        Ok(removed)
    }

    /// Run the query pipeline over the review snapshot.
    pub fn find_all(
        &self,
        filter: &ReviewFilter,
        order: &SortOrder,
        page: &PageRequest,
    ) -> Vec<Review> {
        let store = self.read();
        let mut reviews = store.reviews();
        let total = reviews.len();

        sort_reviews(&mut reviews, order);
        let selected: Vec<Review> = paginate(filter.apply(reviews.into_iter()), page).collect();
        debug!(total, selected = selected.len(), "review query");
        selected
    }

    /// Count the reviews matching a filter, ignoring pagination.
    pub fn count(&self, filter: &ReviewFilter) -> u64 {
        let reviews = self.read().reviews();
        filter.apply(reviews.into_iter()).count() as u64
    }

    /// Movies per rating bucket of their mean review rating.
    pub fn movie_count_by_rating(&self, buckets: &[RatingBucket]) -> Vec<(String, u64)> {
        count_by_rating_bucket(&self.read().reviews(), buckets)
    }

    /// Same summary over the standard low/medium/high buckets.
    pub fn movie_count_by_default_rating(&self) -> Vec<(String, u64)> {
        self.movie_count_by_rating(&RatingBucket::default_buckets())
    }
}

fn check_id(id: i64) -> Result<()> {
    if id < 0 {
        return Err(ServiceError::Invalid("Id must not be negative".to_string()));
    }
    Ok(())
}

/// Entity-level validation for create and update.
fn validate_review(review: &Review) -> Result<()> {
    if review.rating < MIN_RATING || review.rating > MAX_RATING {
        return Err(ServiceError::Invalid(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    if review.text.chars().count() > MAX_REVIEW_LENGTH {
        return Err(ServiceError::Invalid(format!(
            "Maximum review length is {MAX_REVIEW_LENGTH}"
        )));
    }
    if review.date_time > Local::now().naive_local() {
        return Err(ServiceError::Invalid(
            "Review date cannot be in the future".to_string(),
        ));
    }
    Ok(())
}
