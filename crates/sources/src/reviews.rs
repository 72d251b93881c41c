//! Review highlight curation.
//!
//! Picks a small, shuffled set of substantial reviews from several movies
//! for a "what people are saying" strip.

use catalog::{Movie, MovieId, Review};
use rand::Rng;
use rand::seq::SliceRandom;

/// Longer reviews are cut to this many characters plus an ellipsis.
pub const MAX_HIGHLIGHT_CHARS: usize = 300;

/// Reviews shorter than this (after truncation) are not highlighted.
pub const MIN_HIGHLIGHT_CHARS: usize = 100;

/// Number of highlights returned.
pub const HIGHLIGHT_COUNT: usize = 6;

/// A review tagged with the movie it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewHighlight {
    pub movie_id: MovieId,
    pub movie_title: String,
    pub review: Review,
}

/// Flatten, truncate, filter, shuffle and cap review batches.
pub fn curate_reviews<R: Rng + ?Sized>(
    batches: Vec<(Movie, Vec<Review>)>,
    rng: &mut R,
) -> Vec<ReviewHighlight> {
    let mut highlights: Vec<ReviewHighlight> = batches
        .into_iter()
        .flat_map(|(movie, reviews)| {
            reviews.into_iter().map(move |mut review| {
                review.content = truncate(&review.content);
                ReviewHighlight {
                    movie_id: movie.id,
                    movie_title: movie.title.clone(),
                    review,
                }
            })
        })
        .filter(|h| h.review.content.chars().count() >= MIN_HIGHLIGHT_CHARS)
        .collect();

    highlights.shuffle(rng);
    highlights.truncate(HIGHLIGHT_COUNT);
    highlights
}

fn truncate(content: &str) -> String {
    if content.chars().count() > MAX_HIGHLIGHT_CHARS {
        let cut: String = content.chars().take(MAX_HIGHLIGHT_CHARS).collect();
        format!("{cut}...")
    } else {
        content.to_string()
    }
}
