//! Filter to keep only movies matching the chosen genre or mood.

use catalog::Movie;

use crate::preferences::PreferenceSnapshot;
use crate::traits::Filter;

/// Keeps candidates whose single genre is in the allowed set.
///
/// ## Algorithm
/// 1. Allowed set = chosen genre ∪ genres associated with the mood
/// 2. Empty set: accept everything
/// 3. Otherwise accept iff the movie's genre label is a member
///
/// A movie without a resolved genre ("Unknown") never matches a
/// non-empty set.
pub struct GenreMoodFilter;

impl Filter for GenreMoodFilter {
    fn name(&self) -> &str {
        "GenreMoodFilter"
    }

    fn accepts(&self, movie: &Movie, prefs: &PreferenceSnapshot) -> bool {
        let allowed = prefs.allowed_genres();
        if allowed.is_empty() {
            return true;
        }
        movie.has_known_genre() && allowed.contains(&movie.genre.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::Mood;
    use catalog::UNKNOWN_GENRE;

    fn genre(label: &str) -> Movie {
        Movie {
            id: 1,
            title: label.to_string(),
            genre: label.to_string(),
            year: None,
            rating: 5.0,
            description: String::new(),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_need_a_good_laugh_means_comedy() {
        let prefs = PreferenceSnapshot::new().with_mood(Mood::NeedAGoodLaugh);
        assert!(GenreMoodFilter.accepts(&genre("Comedy"), &prefs));
        assert!(!GenreMoodFilter.accepts(&genre("Animation"), &prefs));
    }

    #[test]
    fn test_genre_and_mood_union() {
        let prefs = PreferenceSnapshot::new()
            .with_genre("Drama")
            .with_mood(Mood::Happy);

        for label in ["Drama", "Comedy", "Animation", "Family"] {
            assert!(GenreMoodFilter.accepts(&genre(label), &prefs), "{label}");
        }
        assert!(!GenreMoodFilter.accepts(&genre("Horror"), &prefs));
    }

    #[test]
    fn test_unknown_genre_only_passes_without_constraint() {
        let constrained = PreferenceSnapshot::new().with_genre("Drama");
        assert!(!GenreMoodFilter.accepts(&genre(UNKNOWN_GENRE), &constrained));
        assert!(!GenreMoodFilter.accepts(&genre(""), &constrained));

        let open = PreferenceSnapshot::new();
        assert!(GenreMoodFilter.accepts(&genre(UNKNOWN_GENRE), &open));
    }

    #[test]
    fn test_genre_match_is_exact() {
        let prefs = PreferenceSnapshot::new().with_genre("Science Fiction");
        assert!(GenreMoodFilter.accepts(&genre("Science Fiction"), &prefs));
        assert!(!GenreMoodFilter.accepts(&genre("science fiction"), &prefs));
    }
}
