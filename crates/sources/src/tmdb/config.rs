use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings for the TMDB API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// API key sent as the `api_key` query parameter
    pub api_key: String,

    /// REST base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Prefix for full-size poster paths
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Prefix for poster thumbnails
    #[serde(default = "default_thumbnail_base_url")]
    pub thumbnail_base_url: String,

    /// Response language
    #[serde(default = "default_language")]
    pub language: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_thumbnail_base_url() -> String {
    "https://image.tmdb.org/t/p/w342".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl TmdbConfig {
    /// Default endpoints with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            thumbnail_base_url: default_thumbnail_base_url(),
            language: default_language(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Point the client at another server, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
