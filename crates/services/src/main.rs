//! Demo harness for the catalog services.
//!
//! Loads a seed file and runs a representative query pass over each
//! resource so the full pipeline can be eyeballed end to end.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use tracing::info;

use catalog::constants::MOVIE_SORT_PROPERTIES;
use catalog::CatalogStore;
use query::filters::{MovieFilter, PersonFilter};
use query::page::PageRequest;
use query::sort::SortOrder;
use services::{MovieService, PersonService, ReviewService};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,services=debug")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/catalog.json"));

    info!("Loading catalog from {}", path.display());
    let store = CatalogStore::load_from_file(&path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
    let (movies, people, reviews) = store.counts();
    info!("Loaded {movies} movies, {people} people, {reviews} reviews");

    let store = Arc::new(RwLock::new(store));
    let movie_service = MovieService::new(store.clone());
    let person_service = PersonService::new(store.clone());
    let review_service = ReviewService::new(store);

    // Movies by title, first page
    let order = SortOrder::parse(&["title", "asc"], MOVIE_SORT_PROPERTIES)?;
    let records = movie_service.find_all(
        &MovieFilter::builder().build(),
        &order,
        &PageRequest::default(),
    )?;
    info!("First page of movies by title:");
    for record in &records {
        info!(
            "  {} ({}) - dir. {} {}",
            record.movie.title,
            record.movie.release_year,
            record.director.first_name,
            record.director.last_name
        );
    }

    // Genre distribution
    info!("Movies per genre:");
    for (genre, count) in movie_service.count_by_genre() {
        info!("  {genre}: {count}");
    }

    // Filmography summary
    info!("Filmography summary:");
    for record in person_service.summary(&PersonFilter::builder().build(), &PageRequest::default())
    {
        info!(
            "  {} {}: directed {}, acted in {}",
            record.first_name, record.last_name, record.directed, record.acted
        );
    }

    // Rating buckets
    info!("Movies per rating bucket:");
    for (label, count) in review_service.movie_count_by_default_rating() {
        info!("  {label}: {count}");
    }

    Ok(())
}
