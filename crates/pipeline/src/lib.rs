//! Preference handling and candidate filtering.
//!
//! This crate provides:
//! - PreferenceSnapshot and the Questionnaire that produces it
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! Candidates from a movie source pass through the pipeline before they
//! enter the recommendation queue:
//! 1. MinimumRatingFilter drops movies below the rating floor
//! 2. DurationFilter holds the slot for runtime filtering (no-op today)
//! 3. GenreMoodFilter keeps movies in the chosen genre or mood genres
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, PreferenceSnapshot};
//!
//! let prefs = PreferenceSnapshot::from_answers(answers);
//! let filtered = FilterPipeline::standard().apply(candidates, &prefs);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod preferences;
pub mod questionnaire;
pub mod traits;

// Re-export main types
pub use filter_pipeline::{FilterPipeline, matches};
pub use preferences::{DurationPreference, Mood, PreferenceSnapshot, QuestionKey, RatingFloor};
pub use questionnaire::{Question, Questionnaire, QuestionnaireError, QuestionnaireStep};
pub use traits::Filter;
