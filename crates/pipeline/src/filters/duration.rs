//! Placeholder for runtime-based filtering.
//!
//! Candidate batches carry no runtime, so the duration answer cannot be
//! checked at filter time. The filter is kept in the standard pipeline so
//! that runtime filtering has a slot once runtimes are available.

use catalog::Movie;

use crate::preferences::PreferenceSnapshot;
use crate::traits::Filter;

/// Accepts every movie, whatever the duration preference.
pub struct DurationFilter;

impl Filter for DurationFilter {
    fn name(&self) -> &str {
        "DurationFilter"
    }

    fn accepts(&self, _movie: &Movie, _prefs: &PreferenceSnapshot) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::DurationPreference;
    use catalog::sample_movies;

    #[test]
    fn test_duration_filter_is_a_no_op() {
        for duration in DurationPreference::ALL {
            let prefs = PreferenceSnapshot::new().with_duration(duration);
            let movies = sample_movies();
            let count = movies.len();
            assert_eq!(DurationFilter.apply(movies, &prefs).len(), count);
        }
    }
}
