//! Benchmarks for the query engine
//!
//! Run with: cargo bench --package query

use catalog::constants::MOVIE_SORT_PROPERTIES;
use catalog::types::{Movie, Review};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use query::aggregate::{count_by_rating_bucket, RatingBucket};
use query::filters::MovieFilter;
use query::page::{paginate, PageRequest};
use query::sort::{sort_movies, SortOrder};

const GENRES: &[&str] = &["Drama", "Crime", "Action", "Horror", "Comedy"];

fn synthetic_movies(count: i64) -> Vec<Movie> {
    (1..=count)
        .map(|id| Movie {
            id,
            title: format!("Movie number {id}"),
            genre: GENRES[(id % GENRES.len() as i64) as usize].to_string(),
            release_year: 1950 + (id % 70) as i32,
            director_id: id % 100,
            actor_ids: vec![id % 500, (id + 1) % 500, (id + 2) % 500],
        })
        .collect()
}

fn synthetic_reviews(count: i64) -> Vec<Review> {
    let midnight = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (1..=count)
        .map(|id| Review {
            id,
            movie_id: id % 1_000,
            rating: 1.0 + (id % 10) as f32 * 0.9,
            date_time: midnight,
            text: format!("review {id}"),
        })
        .collect()
}

fn bench_filter_sort_paginate(c: &mut Criterion) {
    let movies = synthetic_movies(10_000);
    let order = SortOrder::parse(&["title", "asc"], MOVIE_SORT_PROPERTIES).unwrap();
    let filter = MovieFilter::builder()
        .with_genres(Some(vec!["Crime".to_string(), "Drama".to_string()]))
        .unwrap()
        .build();
    let page = PageRequest::new(3, 20).unwrap();

    c.bench_function("filter_sort_paginate_10k", |b| {
        b.iter(|| {
            let mut snapshot = movies.clone();
            sort_movies(&mut snapshot, black_box(&order));
            let window: Vec<Movie> =
                paginate(filter.apply(snapshot.into_iter()), black_box(&page)).collect();
            black_box(window)
        })
    });
}

fn bench_rating_buckets(c: &mut Criterion) {
    let reviews = synthetic_reviews(50_000);
    let buckets = RatingBucket::default_buckets();

    c.bench_function("rating_buckets_50k", |b| {
        b.iter(|| {
            let counts = count_by_rating_bucket(black_box(&reviews), black_box(&buckets));
            black_box(counts)
        })
    });
}

criterion_group!(benches, bench_filter_sort_paginate, bench_rating_buckets);
criterion_main!(benches);
