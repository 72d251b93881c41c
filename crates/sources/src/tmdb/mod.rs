//! TMDB-backed movie source and catalog lookups.

pub mod client;
pub mod config;
pub mod discover;
mod wire;

pub use client::{PosterList, TmdbClient};
pub use config::TmdbConfig;
pub use discover::{DiscoverMood, DiscoverQuery, RuntimeBand, SortOrder};
