//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern, plus the
//! `matches` predicate the recommendation queue uses.

use std::sync::LazyLock;

use catalog::Movie;
use tracing;

use crate::filters::{DurationFilter, GenreMoodFilter, MinimumRatingFilter};
use crate::preferences::PreferenceSnapshot;
use crate::traits::Filter;

/// Chains multiple filters together into a processing pipeline.
///
/// A movie passes the pipeline only if every filter accepts it.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MinimumRatingFilter)
///     .add_filter(DurationFilter)
///     .add_filter(GenreMoodFilter);
///
/// let filtered = pipeline.apply(candidates, &prefs);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The preference filter: rating floor, duration, genre/mood.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(MinimumRatingFilter)
            .add_filter(DurationFilter)
            .add_filter(GenreMoodFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Whether a single movie passes every filter.
    pub fn accepts(&self, movie: &Movie, prefs: &PreferenceSnapshot) -> bool {
        self.filters.iter().all(|filter| filter.accepts(movie, prefs))
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with the input candidates
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set, in input order
    pub fn apply(&self, candidates: Vec<Movie>, prefs: &PreferenceSnapshot) -> Vec<Movie> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, prefs);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `movie` matches the preference snapshot.
///
/// Total: preferences that cannot be interpreted impose no constraint.
/// Evaluated against [`FilterPipeline::standard`], so the predicate and the
/// session pipeline always apply the same filters.
pub fn matches(movie: &Movie, prefs: &PreferenceSnapshot) -> bool {
    static STANDARD: LazyLock<FilterPipeline> = LazyLock::new(FilterPipeline::standard);
    STANDARD.accepts(movie, prefs)
}
