//! The recommendation queue.
//!
//! Pure, synchronous state: the movies waiting to be shown, the liked
//! history, and the id of the last movie a decision was made on. Fetching
//! lives in [`crate::session`]; this module only decides *what* to fetch
//! and applies the result.

use std::collections::VecDeque;

use catalog::{Movie, MovieId};
use tracing::debug;

/// Backfill once the queue would hold this many movies or fewer after a
/// pop.
pub const LOW_WATER_MARK: usize = 1;

/// The user's verdict on the current movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Like,
    Skip,
}

/// Which fetch a decision needs before it can be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backfill {
    /// The initial popular batch (also used to re-seed an empty session)
    Popular,
    /// Movies related to the given one
    Recommendations(MovieId),
}

#[derive(Debug, Clone, Default)]
pub struct RecommendationQueue {
    movies: VecDeque<Movie>,
    liked: Vec<Movie>,
    last_seed_id: Option<MovieId>,
}

impl RecommendationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with an already filtered batch.
    pub fn seed(&mut self, batch: Vec<Movie>) {
        debug!(count = batch.len(), "Seeding queue");
        self.movies = batch.into();
    }

    /// Append an already filtered batch to the tail.
    ///
    /// No dedup: the same batch appended twice appears twice.
    pub fn append(&mut self, batch: Vec<Movie>) {
        debug!(count = batch.len(), queued = self.movies.len(), "Appending to queue");
        self.movies.extend(batch);
    }

    /// The movie being presented.
    pub fn current(&self) -> Option<&Movie> {
        self.movies.front()
    }

    /// Drop the head and return the new one.
    pub fn advance(&mut self) -> Option<&Movie> {
        if let Some(previous) = self.movies.pop_front() {
            self.last_seed_id = Some(previous.id);
        }
        self.movies.front()
    }

    /// Add the head to the liked history. No-op on an empty queue.
    pub fn record_like(&mut self) -> Option<&Movie> {
        let head = self.movies.front()?.clone();
        self.liked.push(head);
        self.liked.last()
    }

    /// Decide which fetch, if any, `decision` requires.
    ///
    /// - like with a head: recommendations for the head
    /// - skip with a head: recommendations for the head, only if the queue
    ///   drops to the low-water mark
    /// - either on an empty queue: recommendations for the last decided
    ///   movie, or the popular batch if there never was one
    pub fn plan(&self, decision: Decision) -> Option<Backfill> {
        match (self.current(), decision) {
            (Some(head), Decision::Like) => Some(Backfill::Recommendations(head.id)),
            (Some(head), Decision::Skip) => {
                let remaining = self.movies.len() - 1;
                (remaining <= LOW_WATER_MARK).then_some(Backfill::Recommendations(head.id))
            }
            (None, _) => Some(
                self.last_seed_id
                    .map(Backfill::Recommendations)
                    .unwrap_or(Backfill::Popular),
            ),
        }
    }

    /// Apply `decision` together with the filtered result of its backfill.
    ///
    /// Like: history push, append, advance. Skip: append, advance.
    /// On an empty queue there is nothing to decide on, so the backfill is
    /// appended and its first movie becomes the head without being popped.
    pub fn commit(&mut self, decision: Decision, backfill: Vec<Movie>) -> Option<&Movie> {
        let decided = self.current().is_some();
        if decided && decision == Decision::Like {
            self.record_like();
        }
        self.append(backfill);
        if decided { self.advance() } else { self.current() }
    }

    /// Forget queued movies and the last seed. Liked history is kept.
    pub fn reset(&mut self) {
        self.movies.clear();
        self.last_seed_id = None;
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    pub fn liked(&self) -> &[Movie] {
        &self.liked
    }

    pub fn last_seed_id(&self) -> Option<MovieId> {
        self.last_seed_id
    }
}
