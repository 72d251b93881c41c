//! HTTP client for the TMDB v3 API.
//!
//! API Flow:
//! 1. Listings: /movie/popular, /movie/{id}/recommendations, /discover/movie
//! 2. Lookups: /movie/{id}, /movie/{id}/reviews, /{kind}/{id}/watch/providers
//! 3. TV: /tv/popular, /search/tv, /tv/{id}

use async_trait::async_trait;
use catalog::{
    MediaKind, Movie, MovieDetails, MovieId, Review, ShowDetails, ShowId, TvShow, WatchProvider,
};
use rand::Rng;
use rand::seq::SliceRandom;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::{FetchError, FetchResult};
use crate::reviews::{ReviewHighlight, curate_reviews};
use crate::tmdb::config::TmdbConfig;
use crate::tmdb::discover::{DiscoverQuery, SortOrder};
use crate::tmdb::wire::{
    Page, ProvidersResponse, TmdbMovie, TmdbMovieDetails, TmdbReview, TmdbShow, TmdbShowDetails,
};
use crate::traits::MovieSource;

/// Discover pages sampled by [`TmdbClient::discover_random`].
const RANDOM_PAGE_SPAN: u32 = 5;

/// Region whose streaming offers are reported.
const PROVIDER_REGION: &str = "US";

/// Which poster strip to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterList {
    Popular,
    TopRated,
}

impl PosterList {
    fn path(self) -> &'static str {
        match self {
            PosterList::Popular => "/movie/popular",
            PosterList::TopRated => "/movie/top_rated",
        }
    }
}

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Build a client. Fails only if the TLS backend cannot initialise.
    pub fn new(config: TmdbConfig) -> FetchResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// GET `path` with the API key, language and `params`, decoding JSON.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> FetchResult<T> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(path, "TMDB request");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(path, status = status.as_u16(), "TMDB returned an error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }

    async fn movie_page(&self, path: &str, params: &[(&str, String)]) -> FetchResult<Vec<TmdbMovie>> {
        let page: Page<TmdbMovie> = self.get_json(path, params).await?;
        Ok(page.results)
    }

    fn to_movies(&self, raw: Vec<TmdbMovie>) -> Vec<Movie> {
        raw.into_iter()
            .map(|m| m.into_movie(&self.config.image_base_url))
            .collect()
    }

    /// Search movies by title. Entries without a poster are dropped.
    pub async fn search_movies(&self, query: &str) -> FetchResult<Vec<Movie>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let raw = self
            .movie_page(
                "/search/movie",
                &[("query", query.to_string()), ("page", "1".to_string())],
            )
            .await?;
        let movies: Vec<Movie> = self.to_movies(raw.into_iter().filter(TmdbMovie::has_poster).collect());

        info!(query, count = movies.len(), "Movie search completed");
        Ok(movies)
    }

    /// Movies matching a discover query.
    pub async fn discover(&self, query: &DiscoverQuery) -> FetchResult<Vec<Movie>> {
        let raw = self.movie_page("/discover/movie", &query.params()).await?;
        Ok(self.to_movies(raw))
    }

    /// A shuffled handful of popular movies from a random early page.
    pub async fn discover_random(&self, count: usize) -> FetchResult<Vec<Movie>> {
        let page = rand::rng().random_range(1..=RANDOM_PAGE_SPAN);
        let query = DiscoverQuery::new()
            .sort_by(SortOrder::PopularityDesc)
            .page(page);

        let mut movies = self.discover(&query).await?;
        movies.shuffle(&mut rand::rng());
        movies.truncate(count);

        debug!(page, count = movies.len(), "Random discover batch");
        Ok(movies)
    }

    pub async fn movie_details(&self, movie_id: MovieId) -> FetchResult<MovieDetails> {
        let raw: TmdbMovieDetails = self.get_json(&format!("/movie/{movie_id}"), &[]).await?;
        Ok(raw.into_details(&self.config.image_base_url))
    }

    /// First page of reviews for a movie.
    pub async fn movie_reviews(&self, movie_id: MovieId) -> FetchResult<Vec<Review>> {
        let page: Page<TmdbReview> = self
            .get_json(
                &format!("/movie/{movie_id}/reviews"),
                &[("page", "1".to_string())],
            )
            .await?;
        Ok(page.results.into_iter().map(Review::from).collect())
    }

    /// Flat-rate streaming offers in the US.
    pub async fn watch_providers(&self, id: u64, kind: MediaKind) -> FetchResult<Vec<WatchProvider>> {
        let response: ProvidersResponse = self
            .get_json(
                &format!("/{}/{id}/watch/providers", kind.path_segment()),
                &[],
            )
            .await?;

        let mut results = response.results;
        let providers = results
            .remove(PROVIDER_REGION)
            .map(|region| region.flatrate)
            .unwrap_or_default();

        Ok(providers
            .into_iter()
            .map(|p| p.into_provider(&self.config.image_base_url))
            .collect())
    }

    /// Review highlights across a few random popular movies.
    ///
    /// Review lookups run in parallel. A movie whose lookup fails is
    /// skipped; only a failure of the initial discover call is an error.
    pub async fn review_highlights(&self, movie_count: usize) -> FetchResult<Vec<ReviewHighlight>> {
        let movies = self.discover_random(movie_count).await?;

        let mut tasks = JoinSet::new();
        for movie in movies {
            let client = self.clone();
            tasks.spawn(async move {
                let reviews = client.movie_reviews(movie.id).await;
                (movie, reviews)
            });
        }

        let mut batches = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((movie, Ok(reviews))) => batches.push((movie, reviews)),
                Ok((movie, Err(e))) => {
                    warn!(movie_id = movie.id, error = %e, "Review fetch failed");
                }
                Err(e) => warn!(error = %e, "Review task join error"),
            }
        }

        Ok(curate_reviews(batches, &mut rand::rng()))
    }

    pub async fn popular_shows(&self, page: u32) -> FetchResult<Vec<TvShow>> {
        let raw: Page<TmdbShow> = self
            .get_json("/tv/popular", &[("page", page.max(1).to_string())])
            .await?;
        Ok(self.to_shows(raw.results))
    }

    pub async fn search_shows(&self, query: &str) -> FetchResult<Vec<TvShow>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Page<TmdbShow> = self
            .get_json(
                "/search/tv",
                &[("query", query.to_string()), ("page", "1".to_string())],
            )
            .await?;
        Ok(self.to_shows(raw.results))
    }

    pub async fn show_details(&self, show_id: ShowId) -> FetchResult<ShowDetails> {
        let raw: TmdbShowDetails = self.get_json(&format!("/tv/{show_id}"), &[]).await?;
        Ok(raw.into_details(&self.config.image_base_url))
    }

    /// Thumbnail poster URLs for a listing, skipping poster-less entries.
    pub async fn poster_urls(&self, list: PosterList) -> FetchResult<Vec<String>> {
        let raw = self.movie_page(list.path(), &[("page", "1".to_string())]).await?;
        Ok(raw
            .into_iter()
            .filter_map(|m| m.poster_path.filter(|p| !p.is_empty()))
            .map(|p| format!("{}{}", self.config.thumbnail_base_url, p))
            .collect())
    }

    fn to_shows(&self, raw: Vec<TmdbShow>) -> Vec<TvShow> {
        raw.into_iter()
            .map(|s| s.into_show(&self.config.image_base_url))
            .collect()
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn fetch_popular(&self) -> FetchResult<Vec<Movie>> {
        let raw = self
            .movie_page("/movie/popular", &[("page", "1".to_string())])
            .await?;
        let movies = self.to_movies(raw);
        info!(count = movies.len(), "Fetched popular movies");
        Ok(movies)
    }

    async fn fetch_recommendations_for(&self, movie_id: MovieId) -> FetchResult<Vec<Movie>> {
        let raw = self
            .movie_page(
                &format!("/movie/{movie_id}/recommendations"),
                &[("page", "1".to_string())],
            )
            .await?;
        let movies = self.to_movies(raw);
        info!(movie_id, count = movies.len(), "Fetched recommendations");
        Ok(movies)
    }

    fn name(&self) -> &str {
        "tmdb"
    }
}
