//! Core domain types for the movie catalog.
//!
//! Everything here is the shape the rest of the workspace works with once
//! upstream responses have been mapped. The recommendation core only ever
//! reads these values; it never mutates a `Movie`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque identifier for a movie, as assigned by the metadata provider.
pub type MovieId = u64;

/// Identifier for a TV show. Shares the provider's id space with movies
/// but is never interchangeable with a `MovieId` at the API.
pub type ShowId = u64;

/// Genre label used when the upstream entry carries no usable genre.
pub const UNKNOWN_GENRE: &str = "Unknown";

// =============================================================================
// Movie-related Types
// =============================================================================

/// A movie as presented to the user.
///
/// Carries exactly one genre label. Upstream entries can list several
/// genres; the first one is kept and the rest are dropped when mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    /// Release year, `None` when the upstream release date is missing.
    pub year: Option<u16>,
    /// Average vote on a 0-10 scale.
    pub rating: f32,
    pub description: String,
    pub image_url: String,
}

impl Movie {
    /// Whether this movie has a resolved genre label.
    pub fn has_known_genre(&self) -> bool {
        !self.genre.is_empty() && self.genre != UNKNOWN_GENRE
    }

    /// Year formatted for display, `????` when unknown.
    pub fn display_year(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "????".to_string())
    }
}

/// Full detail record for a single movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub movie: Movie,
    /// Runtime in minutes, when the provider knows it.
    pub runtime: Option<u32>,
    /// Every genre label the provider lists, in provider order.
    pub genres: Vec<String>,
    pub backdrop_url: Option<String>,
}

/// A user review of a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub content: String,
    pub url: Option<String>,
    /// The reviewer's own score, 0-10, if they gave one.
    pub rating: Option<f32>,
}

/// A streaming service offering a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchProvider {
    pub id: u64,
    pub name: String,
    pub logo_url: String,
}

/// Whether a lookup targets a movie or a TV show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment the provider uses for this kind.
    pub fn path_segment(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

// =============================================================================
// TV-related Types
// =============================================================================

/// A TV show summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShow {
    pub id: ShowId,
    pub name: String,
    pub genre: String,
    pub first_air_year: Option<u16>,
    pub rating: f32,
    pub overview: String,
    pub image_url: String,
}

/// Detail record for a TV show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDetails {
    pub show: TvShow,
    pub status: Option<String>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    pub genres: Vec<String>,
}

/// Extract the year from a `YYYY-MM-DD` style date.
///
/// Returns `None` for empty or malformed dates rather than guessing.
pub fn year_from_date(date: &str) -> Option<u16> {
    let year = date.trim().get(..4)?;
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    year.parse().ok()
}
