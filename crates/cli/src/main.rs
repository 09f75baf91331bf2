use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;

use catalog::constants::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MOVIE_SORT_PROPERTIES, PERSON_SORT_PROPERTIES,
    REVIEW_SORT_PROPERTIES,
};
use catalog::CatalogStore;
use query::filters::{MovieFilter, PersonFilter, ReviewFilter};
use query::page::PageRequest;
use query::sort::SortOrder;
use services::{MovieService, PersonService, ReviewService};

/// ReelVault - Movie Catalog Service
#[derive(Parser)]
#[command(name = "reel-vault")]
#[command(about = "Query a movie catalog: filter, sort, paginate, summarize", long_about = None)]
struct Cli {
    /// Path to the catalog seed file
    #[arg(short, long, default_value = "data/catalog.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List or count movies
    Movies {
        #[command(subcommand)]
        command: MovieCommands,
    },

    /// List persons or show filmography summaries
    Persons {
        #[command(subcommand)]
        command: PersonCommands,
    },

    /// List or count reviews
    Reviews {
        #[command(subcommand)]
        command: ReviewCommands,
    },

    /// Aggregate summaries over the whole catalog
    Summary {
        #[command(subcommand)]
        command: SummaryCommands,
    },
}

#[derive(clap::Args)]
struct MovieFilterArgs {
    /// Filter by title substring (case-insensitive)
    #[arg(long)]
    title: Option<String>,

    /// Filter by genre; repeat to match any of several
    #[arg(long)]
    genre: Vec<String>,

    /// Filter by exact release year
    #[arg(long)]
    year: Option<i32>,

    /// Filter by director id
    #[arg(long)]
    director_id: Option<i64>,

    /// Filter by actor ids; the movie must feature all of them
    #[arg(long)]
    actor_id: Vec<i64>,
}

#[derive(clap::Args)]
struct PageArgs {
    /// Page number (starting from 0)
    #[arg(long, default_value_t = DEFAULT_PAGE)]
    page: usize,

    /// Page size
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    size: usize,

    /// Sort as "property" or "property,direction"
    #[arg(long, default_value = "id,asc")]
    sort: String,
}

#[derive(Subcommand)]
enum MovieCommands {
    /// List movies matching the filters
    List {
        #[command(flatten)]
        filter: MovieFilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Count movies matching the filters
    Count {
        #[command(flatten)]
        filter: MovieFilterArgs,
    },

    /// Show one movie with its director and cast
    Get {
        /// Movie id
        #[arg(long)]
        id: i64,
    },
}

#[derive(clap::Args)]
struct PersonFilterArgs {
    /// Filter by exact first name (case-insensitive)
    #[arg(long)]
    first_name: Option<String>,

    /// Filter by exact last name (case-insensitive)
    #[arg(long)]
    last_name: Option<String>,

    /// Filter by earliest birth date (inclusive, YYYY-MM-DD)
    #[arg(long)]
    born_from: Option<NaiveDate>,

    /// Filter by latest birth date (inclusive, YYYY-MM-DD)
    #[arg(long)]
    born_to: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum PersonCommands {
    /// List persons matching the filters
    List {
        #[command(flatten)]
        filter: PersonFilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Count persons matching the filters
    Count {
        #[command(flatten)]
        filter: PersonFilterArgs,
    },

    /// Per-person counts of movies directed and acted in
    Summary {
        #[command(flatten)]
        filter: PersonFilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(clap::Args)]
struct ReviewFilterArgs {
    /// Filter by movie id
    #[arg(long)]
    movie_id: Option<i64>,

    /// Filter by review text substring (case-insensitive)
    #[arg(long)]
    text: Option<String>,

    /// Filter by minimum rating (inclusive)
    #[arg(long)]
    rating_from: Option<f32>,

    /// Filter by maximum rating (inclusive)
    #[arg(long)]
    rating_to: Option<f32>,
}

#[derive(Subcommand)]
enum ReviewCommands {
    /// List reviews matching the filters
    List {
        #[command(flatten)]
        filter: ReviewFilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Count reviews matching the filters
    Count {
        #[command(flatten)]
        filter: ReviewFilterArgs,
    },
}

#[derive(Subcommand)]
enum SummaryCommands {
    /// Movie count per genre
    Genres,
    /// Movie count per release year
    Years,
    /// Movie count per director
    Directors,
    /// Movie count per rating bucket of mean review rating
    Ratings,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let store = CatalogStore::load_from_file(&cli.data)
        .with_context(|| format!("Failed to load catalog from {}", cli.data.display()))?;
    let store = Arc::new(RwLock::new(store));

    match cli.command {
        Commands::Movies { command } => handle_movies(MovieService::new(store), command)?,
        Commands::Persons { command } => handle_persons(PersonService::new(store), command)?,
        Commands::Reviews { command } => handle_reviews(ReviewService::new(store), command)?,
        Commands::Summary { command } => handle_summary(store, command)?,
    }

    Ok(())
}

fn movie_filter(args: MovieFilterArgs) -> Result<MovieFilter> {
    let genres = if args.genre.is_empty() {
        None
    } else {
        Some(args.genre)
    };
    let actor_ids = if args.actor_id.is_empty() {
        None
    } else {
        Some(args.actor_id)
    };
    Ok(MovieFilter::builder()
        .with_title(args.title)?
        .with_genres(genres)?
        .with_release_year(args.year)?
        .with_director_id(args.director_id)?
        .with_actor_ids(actor_ids)?
        .build())
}

fn person_filter(args: PersonFilterArgs) -> Result<PersonFilter> {
    Ok(PersonFilter::builder()
        .with_first_name(args.first_name)?
        .with_last_name(args.last_name)?
        .with_birth_date_from(args.born_from)?
        .with_birth_date_to(args.born_to)?
        .build())
}

fn review_filter(args: ReviewFilterArgs) -> Result<ReviewFilter> {
    Ok(ReviewFilter::builder()
        .with_movie_id(args.movie_id)?
        .with_text(args.text)?
        .with_rating_from(args.rating_from)?
        .with_rating_to(args.rating_to)?
        .build())
}

fn page_request(args: &PageArgs, allowed: &[&str]) -> Result<(SortOrder, PageRequest)> {
    let tokens: Vec<&str> = args.sort.split(',').map(str::trim).collect();
    let order = SortOrder::parse(&tokens, allowed)?;
    let page = PageRequest::new(args.page, args.size)?;
    Ok((order, page))
}

fn handle_movies(service: MovieService, command: MovieCommands) -> Result<()> {
    match command {
        MovieCommands::List { filter, page } => {
            let filter = movie_filter(filter)?;
            let (order, page) = page_request(&page, MOVIE_SORT_PROPERTIES)?;
            let records = service.find_all(&filter, &order, &page)?;

            println!("{}", "Movies:".bold().blue());
            for record in &records {
                let actors = record
                    .actors
                    .iter()
                    .map(|a| format!("{} {}", a.first_name, a.last_name))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{:>4}. {} ({}) [{}] - dir. {} {} - cast: {}",
                    record.movie.id.to_string().green(),
                    record.movie.title,
                    record.movie.release_year,
                    record.movie.genre,
                    record.director.first_name,
                    record.director.last_name,
                    actors
                );
            }
            if records.is_empty() {
                println!("{}", "(no matches)".dimmed());
            }
        }
        MovieCommands::Count { filter } => {
            let filter = movie_filter(filter)?;
            println!("{}", service.count(&filter));
        }
        MovieCommands::Get { id } => {
            let record = service.find_record_by_id(id)?;
            println!(
                "{} ({}) [{}]",
                record.movie.title.bold(),
                record.movie.release_year,
                record.movie.genre
            );
            println!(
                "  directed by {} {}",
                record.director.first_name, record.director.last_name
            );
            for actor in &record.actors {
                println!("  featuring {} {}", actor.first_name, actor.last_name);
            }
        }
    }
    Ok(())
}

fn handle_persons(service: PersonService, command: PersonCommands) -> Result<()> {
    match command {
        PersonCommands::List { filter, page } => {
            let filter = person_filter(filter)?;
            let (order, page) = page_request(&page, PERSON_SORT_PROPERTIES)?;

            println!("{}", "Persons:".bold().blue());
            for person in service.find_all(&filter, &order, &page) {
                println!(
                    "{:>4}. {} {} (born {})",
                    person.id.to_string().green(),
                    person.first_name,
                    person.last_name,
                    person.birth_date
                );
            }
        }
        PersonCommands::Count { filter } => {
            let filter = person_filter(filter)?;
            println!("{}", service.count(&filter));
        }
        PersonCommands::Summary { filter, page } => {
            let filter = person_filter(filter)?;
            // the summary keeps store order; only the window applies
            let page = PageRequest::new(page.page, page.size)?;

            println!("{}", "Filmography:".bold().blue());
            for record in service.summary(&filter, &page) {
                println!(
                    "{:>4}. {} {} - directed {}, acted in {}",
                    record.id.to_string().green(),
                    record.first_name,
                    record.last_name,
                    record.directed,
                    record.acted
                );
            }
        }
    }
    Ok(())
}

fn handle_reviews(service: ReviewService, command: ReviewCommands) -> Result<()> {
    match command {
        ReviewCommands::List { filter, page } => {
            let filter = review_filter(filter)?;
            let (order, page) = page_request(&page, REVIEW_SORT_PROPERTIES)?;

            println!("{}", "Reviews:".bold().blue());
            for review in service.find_all(&filter, &order, &page) {
                println!(
                    "{:>4}. movie {} - {:.1}/10 at {} - {}",
                    review.id.to_string().green(),
                    review.movie_id,
                    review.rating,
                    review.date_time,
                    review.text
                );
            }
        }
        ReviewCommands::Count { filter } => {
            let filter = review_filter(filter)?;
            println!("{}", service.count(&filter));
        }
    }
    Ok(())
}

fn handle_summary(store: Arc<RwLock<CatalogStore>>, command: SummaryCommands) -> Result<()> {
    let movies = MovieService::new(store.clone());
    let reviews = ReviewService::new(store);

    match command {
        SummaryCommands::Genres => {
            println!("{}", "Movies per genre:".bold().blue());
            for (genre, count) in movies.count_by_genre() {
                println!("  {genre}: {count}");
            }
        }
        SummaryCommands::Years => {
            println!("{}", "Movies per release year:".bold().blue());
            for (year, count) in movies.count_by_release_year() {
                println!("  {year}: {count}");
            }
        }
        SummaryCommands::Directors => {
            println!("{}", "Movies per director:".bold().blue());
            for (director_id, count) in movies.count_by_director() {
                println!("  director {director_id}: {count}");
            }
        }
        SummaryCommands::Ratings => {
            println!("{}", "Movies per rating bucket:".bold().blue());
            for (label, count) in reviews.movie_count_by_default_rating() {
                println!("  {label}: {count}");
            }
        }
    }
    Ok(())
}
