//! # Catalog Crate
//!
//! Domain types shared by every other crate in the workspace.
//!
//! ## Main Components
//!
//! - **types**: `Movie`, `MovieDetails`, `Review`, `WatchProvider`, `TvShow`
//! - **genre**: provider genre id table and single-label resolution
//! - **sample**: a small offline catalog

pub mod genre;
pub mod sample;
pub mod types;

// Re-export commonly used types for convenience
pub use genre::{genre_id, genre_label, primary_genre};
pub use sample::sample_movies;
pub use types::{
    // Type aliases
    MovieId,
    ShowId,
    // Core types
    Movie,
    MovieDetails,
    Review,
    ShowDetails,
    TvShow,
    WatchProvider,
    // Enums
    MediaKind,
    // Helpers
    UNKNOWN_GENRE,
    year_from_date,
};
