//! Genre id table for the metadata provider.
//!
//! The provider identifies genres by numeric id. Movies in this workspace
//! carry a single label, resolved from the first id in the upstream list.

use crate::types::UNKNOWN_GENRE;

/// Provider genre ids and their display labels.
pub const GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// Look up the label for a provider genre id.
pub fn genre_label(id: u32) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, label)| *label)
}

/// Look up the provider id for a genre label (exact match).
pub fn genre_id(label: &str) -> Option<u32> {
    GENRES
        .iter()
        .find(|(_, genre_label)| *genre_label == label)
        .map(|(id, _)| *id)
}

/// Resolve the single genre label for an upstream genre id list.
///
/// Only the first id is considered. An empty list or an id missing from
/// the table both resolve to [`UNKNOWN_GENRE`]; later ids are not tried.
pub fn primary_genre(ids: &[u32]) -> String {
    ids.first()
        .and_then(|id| genre_label(*id))
        .unwrap_or(UNKNOWN_GENRE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_lookup() {
        assert_eq!(genre_label(878), Some("Science Fiction"));
        assert_eq!(genre_label(1), None);
        assert_eq!(genre_id("Family"), Some(10751));
        assert_eq!(genre_id("family"), None);
    }

    #[test]
    fn test_primary_genre_uses_first_entry_only() {
        assert_eq!(primary_genre(&[35, 28]), "Comedy");
        // First id unmapped: no fallback to the second one.
        assert_eq!(primary_genre(&[10770, 28]), UNKNOWN_GENRE);
        assert_eq!(primary_genre(&[]), UNKNOWN_GENRE);
    }
}
