//! Grouped counting and rating-bucket aggregation.
//!
//! Counts are computed fresh from the collection handed in; nothing is
//! cached between calls.

use std::collections::HashMap;
use std::hash::Hash;

use catalog::types::{MovieId, Review};

/// Count entities per derived key.
///
/// Every distinct key appears exactly once, in order of first appearance.
pub fn count_by<T, K, F>(items: &[T], key_fn: F) -> Vec<(K, u64)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut counts: HashMap<K, u64> = HashMap::new();
    let mut order: Vec<K> = Vec::new();
    for item in items {
        let key = key_fn(item);
        match counts.entry(key.clone()) {
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                *entry.get_mut() += 1;
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(1);
                order.push(key);
            }
        }
    }
    order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect()
}

/// A closed rating interval with a canonical label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingBucket {
    pub low: f32,
    pub high: f32,
}

impl RatingBucket {
    pub fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Canonical label, one decimal place: `"low-high"`
    pub fn label(&self) -> String {
        format!("{:.1}-{:.1}", self.low, self.high)
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= f64::from(self.low) && value <= f64::from(self.high)
    }

    /// The standard low/medium/high split over the rating domain
    pub fn default_buckets() -> Vec<RatingBucket> {
        vec![
            RatingBucket::new(1.0, 4.9),
            RatingBucket::new(5.0, 7.9),
            RatingBucket::new(8.0, 10.0),
        ]
    }
}

/// Count movies per rating bucket of their mean review rating.
///
/// ## Algorithm
/// 1. Group all reviews by movie id
/// 2. Compute each movie's mean rating in floating point
/// 3. Find the FIRST bucket (in supplied order) whose interval contains
///    the mean and increment its count
///
/// Overlapping buckets are tolerated: first match wins. A mean contained
/// in no bucket increments nothing. Every supplied bucket appears in the
/// output, in supplied order, even at count zero.
pub fn count_by_rating_bucket(reviews: &[Review], buckets: &[RatingBucket]) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = buckets.iter().map(|b| (b.label(), 0)).collect();

    let mut ratings_by_movie: HashMap<MovieId, Vec<f32>> = HashMap::new();
    for review in reviews {
        ratings_by_movie
            .entry(review.movie_id)
            .or_default()
            .push(review.rating);
    }

    for ratings in ratings_by_movie.values() {
        let mean = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64
        };
        if let Some(position) = buckets.iter().position(|b| b.contains(mean)) {
            counts[position].1 += 1;
        }
    }

    counts
}
