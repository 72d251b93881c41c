//! Filter enforcing the minimum rating answer.

use catalog::Movie;

use crate::preferences::PreferenceSnapshot;
use crate::traits::Filter;

/// Rejects movies rated strictly below the preferred floor.
///
/// ## Algorithm
/// 1. Read the threshold from the snapshot ("Any rating" has none)
/// 2. No threshold: accept
/// 3. Otherwise accept iff `movie.rating >= threshold`
pub struct MinimumRatingFilter;

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn accepts(&self, movie: &Movie, prefs: &PreferenceSnapshot) -> bool {
        match prefs.min_rating() {
            Some(threshold) => movie.rating >= threshold,
            None => true,
        }
    }
}
