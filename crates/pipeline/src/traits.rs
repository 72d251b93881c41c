//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible predicates to be applied to candidate batches.

use catalog::Movie;

use crate::preferences::PreferenceSnapshot;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared with async sessions
/// - `accepts` is total: a preference it cannot interpret is no constraint
/// - `apply` takes ownership of the batch and keeps the input order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `movie` satisfies this filter's constraint under `prefs`.
    fn accepts(&self, movie: &Movie, prefs: &PreferenceSnapshot) -> bool;

    /// Keep the movies this filter accepts, in their original order.
    fn apply(&self, movies: Vec<Movie>, prefs: &PreferenceSnapshot) -> Vec<Movie> {
        movies
            .into_iter()
            .filter(|movie| self.accepts(movie, prefs))
            .collect()
    }
}
