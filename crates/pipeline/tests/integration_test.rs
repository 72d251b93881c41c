//! Integration tests for the pipeline.
//!
//! These tests verify that questionnaire answers and filters work together
//! in realistic scenarios.

use std::collections::HashMap;

use catalog::Movie;
use pipeline::{FilterPipeline, Mood, PreferenceSnapshot, Questionnaire, QuestionnaireStep, matches};

fn movie(id: u64, genre: &str, rating: f32) -> Movie {
    Movie {
        id,
        title: format!("{genre} {rating}"),
        genre: genre.to_string(),
        year: Some(2020),
        rating,
        description: String::new(),
        image_url: String::new(),
    }
}

fn create_seed_batch() -> Vec<Movie> {
    vec![
        movie(1, "Action", 8.0),
        movie(2, "Comedy", 9.0),
        movie(3, "Adventure", 5.0),
        movie(4, "Thriller", 7.5),
        movie(5, "Drama", 8.8),
    ]
}

#[test]
fn test_excited_above_six_keeps_order() {
    let answers = HashMap::from([
        ("mood".to_string(), "Excited".to_string()),
        ("rating".to_string(), "Above 6".to_string()),
    ]);
    let prefs = PreferenceSnapshot::from_answers(answers);

    let filtered = FilterPipeline::standard().apply(create_seed_batch(), &prefs);

    // Comedy and Drama fail the genre check, Adventure the rating floor.
    let ids: Vec<u64> = filtered.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn test_rating_floor_is_inclusive() {
    let prefs = PreferenceSnapshot::from_answers([("rating", "Above 7")]);
    for rating in [0.0, 6.9, 7.0, 7.1, 10.0] {
        let m = movie(1, "Drama", rating);
        assert_eq!(matches(&m, &prefs), rating >= 7.0, "rating {rating}");
    }
}

#[test]
fn test_mood_only_constrains_genre() {
    let prefs = PreferenceSnapshot::new().with_mood(Mood::NeedAGoodLaugh);
    for genre in ["Comedy", "Drama", "Horror", "Unknown"] {
        let m = movie(1, genre, 5.0);
        assert_eq!(matches(&m, &prefs), genre == "Comedy", "genre {genre}");
    }
}

#[test]
fn test_pipeline_and_matches_agree() {
    let prefs = PreferenceSnapshot::new()
        .with_genre("Drama")
        .with_mood(Mood::Happy);
    let pipeline = FilterPipeline::standard();

    let batch = vec![
        movie(1, "Drama", 3.0),
        movie(2, "Family", 6.0),
        movie(3, "Horror", 9.0),
        movie(4, "Animation", 7.0),
    ];
    let expected: Vec<u64> = batch
        .iter()
        .filter(|m| matches(m, &prefs))
        .map(|m| m.id)
        .collect();
    let filtered: Vec<u64> = pipeline.apply(batch, &prefs).iter().map(|m| m.id).collect();

    assert_eq!(filtered, expected);
    assert_eq!(filtered, vec![1, 2, 4]);
}

#[test]
fn test_duplicates_survive_filtering() {
    let prefs = PreferenceSnapshot::new();
    let batch = vec![movie(7, "Drama", 8.0), movie(7, "Drama", 8.0)];
    assert_eq!(FilterPipeline::standard().apply(batch, &prefs).len(), 2);
}

#[test]
fn test_questionnaire_to_filter() {
    let mut questionnaire = Questionnaire::new();
    questionnaire.answer("Thoughtful").unwrap();
    questionnaire.answer("Horror").unwrap();
    questionnaire.answer("Under 90 mins").unwrap();
    let QuestionnaireStep::Complete(prefs) = questionnaire.answer("Any rating").unwrap() else {
        panic!("questionnaire should be complete");
    };

    let batch = vec![
        movie(1, "Horror", 2.0),
        movie(2, "Mystery", 6.0),
        movie(3, "Comedy", 9.5),
        movie(4, "Drama", 4.0),
    ];
    let ids: Vec<u64> = FilterPipeline::standard()
        .apply(batch, &prefs)
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 4]);
}
