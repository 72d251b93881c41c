//! Small built-in catalog for offline use and tests.

use crate::types::Movie;

/// A handful of well-known titles with stable ids.
pub fn sample_movies() -> Vec<Movie> {
    vec![
        entry(
            1,
            "Inception",
            "Science Fiction",
            2010,
            8.8,
            "A thief who steals corporate secrets through dream-sharing technology is given the inverse task of planting an idea into the mind of a C.E.O.",
            "https://images.unsplash.com/photo-1536440136628-849c177e76a1?auto=format&fit=crop&q=80&w=800",
        ),
        entry(
            2,
            "The Shawshank Redemption",
            "Drama",
            1994,
            9.3,
            "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
            "https://images.unsplash.com/photo-1478720568477-152d9b164e26?auto=format&fit=crop&q=80&w=800",
        ),
        entry(
            3,
            "Pulp Fiction",
            "Crime",
            1994,
            8.9,
            "The lives of two mob hitmen, a boxer, a gangster and his wife, and a pair of diner bandits intertwine in four tales of violence and redemption.",
            "https://images.unsplash.com/photo-1542204165-65bf26472b9b?auto=format&fit=crop&q=80&w=800",
        ),
        entry(
            4,
            "The Dark Knight",
            "Action",
            2008,
            9.0,
            "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests of his ability to fight injustice.",
            "https://images.unsplash.com/photo-1509347528160-9a9e33742cdb?auto=format&fit=crop&q=80&w=800",
        ),
        entry(
            5,
            "Interstellar",
            "Science Fiction",
            2014,
            8.6,
            "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
            "https://images.unsplash.com/photo-1506318137071-a8e063b4bec0?auto=format&fit=crop&q=80&w=800",
        ),
    ]
}

fn entry(
    id: u64,
    title: &str,
    genre: &str,
    year: u16,
    rating: f32,
    description: &str,
    image_url: &str,
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        genre: genre.to_string(),
        year: Some(year),
        rating,
        description: description.to_string(),
        image_url: image_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_are_unique() {
        let movies = sample_movies();
        let ids: HashSet<_> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), movies.len());
    }
}
