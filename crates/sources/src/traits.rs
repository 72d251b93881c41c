//! The capability the recommendation core depends on.

use async_trait::async_trait;
use catalog::{Movie, MovieId};

use crate::error::FetchResult;

/// Supplies candidate movies to the recommendation queue.
///
/// Implementations map the provider's representation into [`Movie`]
/// themselves, including the single-genre resolution. Batch order is not
/// guaranteed to be stable between calls.
///
/// ## Design Note
/// - `Send + Sync` so a source can sit behind an `Arc` shared with tasks
/// - Object safe, so sessions can hold `Arc<dyn MovieSource>`
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// A batch of currently popular movies.
    async fn fetch_popular(&self) -> FetchResult<Vec<Movie>>;

    /// Movies related to `movie_id`. Empty when the source knows none.
    async fn fetch_recommendations_for(&self, movie_id: MovieId) -> FetchResult<Vec<Movie>>;

    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str {
        "source"
    }
}
