use anyhow::{anyhow, Context, Result};
use catalog::{genre_id, MediaKind, Movie, TvShow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::PreferenceSnapshot;
use session::{RecommendationSession, SessionConfig};
use sources::{
    DiscoverMood, DiscoverQuery, MovieSource, PosterList, RuntimeBand, StaticSource, TmdbClient,
    TmdbConfig,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

mod swipe;

/// CineSwipe - swipe through movie recommendations from the terminal
#[derive(Parser)]
#[command(name = "cineswipe")]
#[command(about = "Preference-driven movie recommendations backed by TMDB", long_about = None)]
struct Cli {
    /// TMDB API key
    #[arg(long, env = "TMDB_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Override the TMDB API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10", global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a few questions, then like or skip recommendations
    Swipe {
        /// Use the built-in sample catalog instead of TMDB
        #[arg(long)]
        offline: bool,

        /// Mood answer (skips the questionnaire when any preference flag is given)
        #[arg(long)]
        mood: Option<String>,

        /// Genre answer
        #[arg(long)]
        genre: Option<String>,

        /// Duration answer
        #[arg(long)]
        duration: Option<String>,

        /// Rating answer, e.g. "Above 7"
        #[arg(long)]
        rating: Option<String>,
    },

    /// Search movies (or TV shows) by title
    Search {
        /// Text to search for
        query: String,

        /// Search TV shows instead of movies
        #[arg(long)]
        tv: bool,
    },

    /// Discover movies by genre, mood and runtime, or at random
    Discover {
        /// Genre label, repeatable (e.g. --genre Action --genre Comedy)
        #[arg(long)]
        genre: Vec<String>,

        /// happy, sad, excited or relaxed
        #[arg(long)]
        mood: Option<String>,

        /// short, medium or long
        #[arg(long)]
        runtime: Option<String>,

        /// Number of random picks when no filter is given
        #[arg(long, default_value = "12")]
        count: usize,
    },

    /// Show details for a movie or TV show
    Details {
        /// TMDB id
        id: u64,

        /// Treat the id as a TV show
        #[arg(long)]
        tv: bool,
    },

    /// Show curated review highlights across popular movies
    Reviews {
        /// How many movies to collect reviews from
        #[arg(long, default_value = "10")]
        movies: usize,
    },

    /// List US streaming providers for a movie or TV show
    Providers {
        /// TMDB id
        id: u64,

        /// Treat the id as a TV show
        #[arg(long)]
        tv: bool,
    },

    /// List popular TV shows
    Shows {
        /// Result page
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Print poster thumbnail URLs
    Posters {
        /// Use the top rated list instead of popular
        #[arg(long)]
        top_rated: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Offline swiping is the only mode that needs no client
    if let Commands::Swipe {
        offline: true,
        mood,
        genre,
        duration,
        rating,
    } = &cli.command
    {
        let source: Arc<dyn MovieSource> = Arc::new(StaticSource::sample());
        let preset = preset_preferences(mood, genre, duration, rating);
        return handle_swipe(source, preset, cli.timeout).await;
    }

    let client = build_client(&cli)?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Swipe {
            mood,
            genre,
            duration,
            rating,
            ..
        } => {
            let preset = preset_preferences(&mood, &genre, &duration, &rating);
            handle_swipe(Arc::new(client), preset, cli.timeout).await?
        }
        Commands::Search { query, tv } => handle_search(&client, &query, tv).await?,
        Commands::Discover {
            genre,
            mood,
            runtime,
            count,
        } => handle_discover(&client, genre, mood, runtime, count).await?,
        Commands::Details { id, tv } => handle_details(&client, id, tv).await?,
        Commands::Reviews { movies } => handle_reviews(&client, movies).await?,
        Commands::Providers { id, tv } => handle_providers(&client, id, tv).await?,
        Commands::Shows { page } => handle_shows(&client, page).await?,
        Commands::Posters { top_rated } => handle_posters(&client, top_rated).await?,
    }

    Ok(())
}

fn build_client(cli: &Cli) -> Result<TmdbClient> {
    let api_key = cli
        .api_key
        .clone()
        .ok_or_else(|| anyhow!("A TMDB API key is required: pass --api-key or set TMDB_API_KEY"))?;

    let mut config = TmdbConfig::new(api_key);
    config.request_timeout_secs = cli.timeout;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }

    TmdbClient::new(config).context("Failed to build TMDB client")
}

/// Preferences given as flags, if any were.
fn preset_preferences(
    mood: &Option<String>,
    genre: &Option<String>,
    duration: &Option<String>,
    rating: &Option<String>,
) -> Option<PreferenceSnapshot> {
    let answers: Vec<(&str, &str)> = [
        ("mood", mood),
        ("genre", genre),
        ("duration", duration),
        ("rating", rating),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    .collect();

    if answers.is_empty() {
        None
    } else {
        Some(PreferenceSnapshot::from_answers(answers))
    }
}

/// Handle the 'swipe' command
async fn handle_swipe(
    source: Arc<dyn MovieSource>,
    preset: Option<PreferenceSnapshot>,
    timeout_secs: u64,
) -> Result<()> {
    info!("Starting swipe session with source '{}'", source.name());
    let config = SessionConfig {
        fetch_timeout: Duration::from_secs(timeout_secs),
    };
    let session = RecommendationSession::with_config(source, config);
    swipe::run(&session, preset).await
}

/// Handle the 'search' command
async fn handle_search(client: &TmdbClient, query: &str, tv: bool) -> Result<()> {
    println!("{}", format!("Search results for '{}':", query).bold().blue());
    if tv {
        let shows = client
            .search_shows(query)
            .await
            .context("Failed to search TV shows")?;
        print_shows(&shows);
    } else {
        let movies = client
            .search_movies(query)
            .await
            .context("Failed to search movies")?;
        print_movies(&movies);
    }
    Ok(())
}

/// Handle the 'discover' command
async fn handle_discover(
    client: &TmdbClient,
    genres: Vec<String>,
    mood: Option<String>,
    runtime: Option<String>,
    count: usize,
) -> Result<()> {
    let start = Instant::now();

    let movies = if genres.is_empty() && mood.is_none() && runtime.is_none() {
        client
            .discover_random(count)
            .await
            .context("Failed to discover movies")?
    } else {
        let mut query = DiscoverQuery::new();
        for label in &genres {
            let id = genre_id(label).ok_or_else(|| anyhow!("Unknown genre '{}'", label))?;
            query = query.genre(id);
        }
        if let Some(mood) = &mood {
            let mood = DiscoverMood::from_label(mood)
                .ok_or_else(|| anyhow!("Unknown mood '{}' (happy, sad, excited, relaxed)", mood))?;
            query = query.mood(mood);
        }
        if let Some(runtime) = &runtime {
            let band = RuntimeBand::from_label(runtime)
                .ok_or_else(|| anyhow!("Unknown runtime '{}' (short, medium, long)", runtime))?;
            query = query.runtime(band);
        }
        client
            .discover(&query)
            .await
            .context("Failed to discover movies")?
    };

    println!("{}", "Discovered movies:".bold().blue());
    print_movies(&movies);
    println!("{} Found {} movies in {:.2?}", "✓".green(), movies.len(), start.elapsed());
    Ok(())
}

/// Handle the 'details' command
async fn handle_details(client: &TmdbClient, id: u64, tv: bool) -> Result<()> {
    if tv {
        let details = client
            .show_details(id)
            .await
            .with_context(|| format!("Failed to load TV show {}", id))?;
        let show = &details.show;
        println!("{}", show.name.bold().blue());
        println!("{}Genres: {}", "• ".green(), details.genres.join(", "));
        if let Some(status) = &details.status {
            println!("{}Status: {}", "• ".green(), status);
        }
        if let (Some(seasons), Some(episodes)) =
            (details.number_of_seasons, details.number_of_episodes)
        {
            println!("{}Seasons: {} ({} episodes)", "• ".green(), seasons, episodes);
        }
        println!("{}Rating: {:.1}", "• ".green(), show.rating);
        println!("\n{}", show.overview);
        return Ok(());
    }

    let details = client
        .movie_details(id)
        .await
        .with_context(|| format!("Failed to load movie {}", id))?;
    let movie = &details.movie;
    println!(
        "{}",
        format!("{} ({})", movie.title, movie.display_year()).bold().blue()
    );
    println!("{}Genres: {}", "• ".green(), details.genres.join(", "));
    if let Some(runtime) = details.runtime {
        println!("{}Runtime: {} min", "• ".green(), runtime);
    }
    println!("{}Rating: {:.1}", "• ".green(), movie.rating);
    if !movie.image_url.is_empty() {
        println!("{}Poster: {}", "• ".green(), movie.image_url);
    }
    println!("\n{}", movie.description);
    Ok(())
}

/// Handle the 'reviews' command
async fn handle_reviews(client: &TmdbClient, movies: usize) -> Result<()> {
    let highlights = client
        .review_highlights(movies)
        .await
        .context("Failed to collect reviews")?;

    println!("{}", "What people are saying:".bold().blue());
    if highlights.is_empty() {
        println!("No reviews found.");
    }
    for highlight in &highlights {
        println!(
            "\n{} {}",
            highlight.movie_title.bold(),
            format!("by {}", highlight.review.author).dimmed()
        );
        if let Some(rating) = highlight.review.rating {
            println!("  Rated {:.1}/10", rating);
        }
        println!("  {}", highlight.review.content);
    }
    Ok(())
}

/// Handle the 'providers' command
async fn handle_providers(client: &TmdbClient, id: u64, tv: bool) -> Result<()> {
    let kind = if tv { MediaKind::Tv } else { MediaKind::Movie };
    let providers = client
        .watch_providers(id, kind)
        .await
        .with_context(|| format!("Failed to load providers for {}", id))?;

    println!("{}", "Streaming in the US:".bold().blue());
    if providers.is_empty() {
        println!("Not available on any subscription service.");
    }
    for provider in &providers {
        println!("{}{}", "• ".green(), provider.name);
    }
    Ok(())
}

/// Handle the 'shows' command
async fn handle_shows(client: &TmdbClient, page: u32) -> Result<()> {
    let shows = client
        .popular_shows(page)
        .await
        .context("Failed to load popular shows")?;
    println!("{}", format!("Popular TV shows (page {}):", page).bold().blue());
    print_shows(&shows);
    Ok(())
}

/// Handle the 'posters' command
async fn handle_posters(client: &TmdbClient, top_rated: bool) -> Result<()> {
    let list = if top_rated {
        PosterList::TopRated
    } else {
        PosterList::Popular
    };
    let urls = client
        .poster_urls(list)
        .await
        .context("Failed to load posters")?;
    for url in urls {
        println!("{}", url);
    }
    Ok(())
}

pub(crate) fn print_movie_line(rank: usize, movie: &Movie) {
    println!(
        "{}. {} ({}) [{}] - {:.1} {}",
        rank.to_string().green(),
        movie.title,
        movie.display_year(),
        movie.genre,
        movie.rating,
        format!("#{}", movie.id).dimmed()
    );
}

fn print_movies(movies: &[Movie]) {
    if movies.is_empty() {
        println!("No movies found.");
    }
    for (i, movie) in movies.iter().enumerate() {
        print_movie_line(i + 1, movie);
    }
}

fn print_shows(shows: &[TvShow]) {
    if shows.is_empty() {
        println!("No shows found.");
    }
    for (i, show) in shows.iter().enumerate() {
        let year = show
            .first_air_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{}. {} ({}) [{}] - {:.1} {}",
            (i + 1).to_string().green(),
            show.name,
            year,
            show.genre,
            show.rating,
            format!("#{}", show.id).dimmed()
        );
    }
}
