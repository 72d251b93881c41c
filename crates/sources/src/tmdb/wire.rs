//! TMDB response shapes and their mapping into catalog types.
//!
//! Fields are defaulted when TMDB omits them or sends `null`, so one
//! sparse entry never fails a whole page.

use std::collections::HashMap;

use catalog::{
    Movie, MovieDetails, Review, ShowDetails, TvShow, UNKNOWN_GENRE, WatchProvider,
    primary_genre, year_from_date,
};
use serde::{Deserialize, Deserializer};

/// One page of a paginated listing.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbGenre {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbMovie {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f32,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
}

impl TmdbMovie {
    pub fn has_poster(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn into_movie(self, image_base_url: &str) -> Movie {
        Movie {
            id: self.id,
            genre: primary_genre(&self.genre_ids),
            year: self.release_date.as_deref().and_then(year_from_date),
            rating: self.vote_average,
            image_url: image_url(image_base_url, self.poster_path.as_deref()),
            title: self.title,
            description: self.overview,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbMovieDetails {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f32,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub runtime: Option<u32>,
}

impl TmdbMovieDetails {
    pub fn into_details(self, image_base_url: &str) -> MovieDetails {
        let genres: Vec<String> = self.genres.into_iter().map(|g| g.name).collect();
        let backdrop_url = self
            .backdrop_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{image_base_url}{p}"));
        MovieDetails {
            movie: Movie {
                id: self.id,
                title: self.title,
                genre: first_or_unknown(&genres),
                year: self.release_date.as_deref().and_then(year_from_date),
                rating: self.vote_average,
                description: self.overview,
                image_url: image_url(image_base_url, self.poster_path.as_deref()),
            },
            // TMDB reports 0 for unknown runtimes
            runtime: self.runtime.filter(|r| *r > 0),
            genres,
            backdrop_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbAuthorDetails {
    #[serde(default)]
    pub rating: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbReview {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author_details: Option<TmdbAuthorDetails>,
}

impl From<TmdbReview> for Review {
    fn from(review: TmdbReview) -> Self {
        Review {
            id: review.id,
            author: review.author,
            content: review.content,
            url: review.url,
            rating: review.author_details.and_then(|d| d.rating),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbProvider {
    pub provider_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RegionProviders {
    #[serde(default, deserialize_with = "null_as_default")]
    pub flatrate: Vec<TmdbProvider>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProvidersResponse {
    #[serde(default)]
    pub results: HashMap<String, RegionProviders>,
}

impl TmdbProvider {
    pub fn into_provider(self, image_base_url: &str) -> WatchProvider {
        WatchProvider {
            id: self.provider_id,
            name: self.provider_name,
            logo_url: image_url(image_base_url, self.logo_path.as_deref()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbShow {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f32,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
}

impl TmdbShow {
    pub fn into_show(self, image_base_url: &str) -> TvShow {
        TvShow {
            id: self.id,
            genre: primary_genre(&self.genre_ids),
            first_air_year: self.first_air_date.as_deref().and_then(year_from_date),
            rating: self.vote_average,
            image_url: image_url(image_base_url, self.poster_path.as_deref()),
            name: self.name,
            overview: self.overview,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbShowDetails {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f32,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
}

impl TmdbShowDetails {
    pub fn into_details(self, image_base_url: &str) -> ShowDetails {
        let genres: Vec<String> = self.genres.into_iter().map(|g| g.name).collect();
        ShowDetails {
            show: TvShow {
                id: self.id,
                name: self.name,
                genre: first_or_unknown(&genres),
                first_air_year: self.first_air_date.as_deref().and_then(year_from_date),
                rating: self.vote_average,
                overview: self.overview,
                image_url: image_url(image_base_url, self.poster_path.as_deref()),
            },
            status: self.status,
            number_of_seasons: self.number_of_seasons,
            number_of_episodes: self.number_of_episodes,
            genres,
        }
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn image_url(base: &str, path: Option<&str>) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{base}{p}"),
        _ => String::new(),
    }
}

fn first_or_unknown(genres: &[String]) -> String {
    genres
        .first()
        .cloned()
        .unwrap_or_else(|| UNKNOWN_GENRE.to_string())
}
