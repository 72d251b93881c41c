//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod duration;
pub mod genre_mood;
pub mod minimum_rating;

// Re-export for convenience
pub use duration::DurationFilter;
pub use genre_mood::GenreMoodFilter;
pub use minimum_rating::MinimumRatingFilter;
