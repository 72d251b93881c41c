//! # Sources Crate
//!
//! This crate supplies movies to the recommendation core.
//!
//! ## Components
//!
//! ### MovieSource
//! The capability the recommendation queue depends on:
//! - `fetch_popular`: the initial candidate batch
//! - `fetch_recommendations_for`: backfill batches keyed off a movie
//!
//! ### TmdbClient
//! HTTP client for the TMDB API. Implements `MovieSource` and adds the
//! lookups the front end needs: search, discover, details, reviews,
//! watch providers and TV shows.
//!
//! ### StaticSource
//! Preloaded batches for offline use and tests.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{MovieSource, TmdbClient, TmdbConfig};
//!
//! let client = TmdbClient::new(TmdbConfig::new(api_key))?;
//! let popular = client.fetch_popular().await?;
//! let related = client.fetch_recommendations_for(popular[0].id).await?;
//! ```

pub mod error;
pub mod reviews;
pub mod static_source;
pub mod tmdb;
pub mod traits;

// Re-export commonly used types
pub use error::{FetchError, FetchResult};
pub use reviews::{ReviewHighlight, curate_reviews};
pub use static_source::StaticSource;
pub use tmdb::{DiscoverMood, DiscoverQuery, PosterList, RuntimeBand, SortOrder, TmdbClient, TmdbConfig};
pub use traits::MovieSource;
