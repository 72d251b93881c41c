//! In-memory movie source.
//!
//! Serves fixed batches without any network access. Used by the CLI's
//! offline mode and by tests that need a deterministic source.

use std::collections::HashMap;

use async_trait::async_trait;
use catalog::{Movie, MovieId, sample_movies};
use tracing::debug;

use crate::error::FetchResult;
use crate::traits::MovieSource;

/// A source that answers from preloaded batches.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    popular: Vec<Movie>,
    recommendations: HashMap<MovieId, Vec<Movie>>,
}

impl StaticSource {
    /// Create a source whose popular batch is `popular` and which knows
    /// no recommendations yet.
    pub fn new(popular: Vec<Movie>) -> Self {
        Self {
            popular,
            recommendations: HashMap::new(),
        }
    }

    /// Register the recommendation batch for `movie_id` (builder pattern).
    pub fn with_recommendations(mut self, movie_id: MovieId, batch: Vec<Movie>) -> Self {
        self.recommendations.insert(movie_id, batch);
        self
    }

    /// The built-in sample catalog, where every movie recommends all the
    /// others.
    pub fn sample() -> Self {
        let movies = sample_movies();
        let mut source = Self::new(movies.clone());
        for movie in &movies {
            let others: Vec<Movie> = movies
                .iter()
                .filter(|other| other.id != movie.id)
                .cloned()
                .collect();
            source.recommendations.insert(movie.id, others);
        }
        source
    }
}

#[async_trait]
impl MovieSource for StaticSource {
    async fn fetch_popular(&self) -> FetchResult<Vec<Movie>> {
        Ok(self.popular.clone())
    }

    async fn fetch_recommendations_for(&self, movie_id: MovieId) -> FetchResult<Vec<Movie>> {
        let batch = self
            .recommendations
            .get(&movie_id)
            .cloned()
            .unwrap_or_default();
        debug!(movie_id, count = batch.len(), "Static recommendations served");
        Ok(batch)
    }

    fn name(&self) -> &str {
        "static"
    }
}
