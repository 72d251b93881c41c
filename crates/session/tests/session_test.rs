//! Integration tests for RecommendationSession.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catalog::{Movie, MovieId, sample_movies};
use mockall::mock;
use mockall::predicate::eq;
use pipeline::PreferenceSnapshot;
use session::{ErrorKind, RecommendationSession, SessionConfig, SessionError, SessionPhase};
use sources::{FetchError, FetchResult, MovieSource, StaticSource};
use tokio::sync::Notify;

mock! {
    pub Source {}

    #[async_trait]
    impl MovieSource for Source {
        async fn fetch_popular(&self) -> FetchResult<Vec<Movie>>;
        async fn fetch_recommendations_for(&self, movie_id: MovieId) -> FetchResult<Vec<Movie>>;
        fn name(&self) -> &str;
    }
}

fn movie(id: MovieId, genre: &str, rating: f32) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        genre: genre.to_string(),
        year: Some(2020),
        rating,
        description: String::new(),
        image_url: String::new(),
    }
}

fn drama(ids: &[MovieId]) -> Vec<Movie> {
    ids.iter().map(|&id| movie(id, "Drama", 7.5)).collect()
}

fn ids(movies: &[Movie]) -> Vec<MovieId> {
    movies.iter().map(|m| m.id).collect()
}

/// A mock whose popular batch is `popular`.
fn source_with_popular(popular: Vec<Movie>) -> MockSource {
    let mut source = MockSource::new();
    source
        .expect_fetch_popular()
        .times(1)
        .returning(move || Ok(popular.clone()));
    source
}

#[tokio::test]
async fn test_questionnaire_seeds_filtered_queue() {
    let source = source_with_popular(vec![
        movie(1, "Action", 8.0),
        movie(2, "Comedy", 9.0),
        movie(3, "Adventure", 5.0),
        movie(4, "Thriller", 7.5),
        movie(5, "Drama", 8.8),
    ]);
    let session = RecommendationSession::new(Arc::new(source));
    assert_eq!(session.phase(), SessionPhase::AwaitingPreferences);

    let first = session
        .complete_questionnaire([("mood", "Excited"), ("rating", "Above 6")])
        .await
        .unwrap();

    assert_eq!(first.map(|m| m.id), Some(1));
    assert_eq!(ids(&session.queued_movies()), vec![1, 4]);
    assert_eq!(session.phase(), SessionPhase::Presenting);
    assert!(!session.is_loading());
    assert!(session.last_error().is_none());
}

#[tokio::test]
async fn test_decisions_before_preferences_are_rejected() {
    let session = RecommendationSession::new(Arc::new(MockSource::new()));

    assert!(matches!(
        session.like().await,
        Err(SessionError::AwaitingPreferences)
    ));
    assert!(matches!(
        session.skip().await,
        Err(SessionError::AwaitingPreferences)
    ));
    assert!(session.last_error().is_none());
    assert_eq!(session.phase(), SessionPhase::AwaitingPreferences);
}

#[tokio::test]
async fn test_like_records_history_and_backfills_from_head() {
    let mut source = source_with_popular(drama(&[1, 2, 3]));
    source
        .expect_fetch_recommendations_for()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(drama(&[10, 11])));

    let session = RecommendationSession::new(Arc::new(source));
    session.start(PreferenceSnapshot::new()).await.unwrap();

    let next = session.like().await.unwrap();

    assert_eq!(next.map(|m| m.id), Some(2));
    assert_eq!(ids(&session.liked_history()), vec![1]);
    assert_eq!(ids(&session.queued_movies()), vec![2, 3, 10, 11]);
}

#[tokio::test]
async fn test_skip_above_low_water_does_not_fetch() {
    let mut source = source_with_popular(drama(&[1, 2, 3]));
    source.expect_fetch_recommendations_for().times(0);

    let session = RecommendationSession::new(Arc::new(source));
    session.start(PreferenceSnapshot::new()).await.unwrap();

    let next = session.skip().await.unwrap();

    assert_eq!(next.map(|m| m.id), Some(2));
    assert_eq!(ids(&session.queued_movies()), vec![2, 3]);
    assert!(session.liked_history().is_empty());
}

#[tokio::test]
async fn test_skip_last_movie_backfills_from_it() {
    let mut source = source_with_popular(drama(&[1]));
    source
        .expect_fetch_recommendations_for()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let session = RecommendationSession::new(Arc::new(source));
    session.start(PreferenceSnapshot::new()).await.unwrap();

    assert!(session.skip().await.unwrap().is_none());
    assert_eq!(session.queue_len(), 0);
    assert!(session.liked_history().is_empty());
    assert_eq!(session.phase(), SessionPhase::Exhausted);
}

#[tokio::test]
async fn test_backfill_is_filtered_against_preferences() {
    let mut source = source_with_popular(drama(&[1, 2, 3]));
    source.expect_fetch_recommendations_for().returning(|_| {
        Ok(vec![
            movie(20, "Drama", 8.0),
            movie(21, "Drama", 5.0),
            movie(22, "Horror", 9.0),
        ])
    });

    let prefs = PreferenceSnapshot::from_answers([("genre", "Drama"), ("rating", "Above 7")]);
    let session = RecommendationSession::new(Arc::new(source));
    session.start(prefs).await.unwrap();
    session.like().await.unwrap();

    assert_eq!(ids(&session.queued_movies()), vec![2, 3, 20]);
}

#[tokio::test]
async fn test_failed_backfill_leaves_state_unchanged() {
    let mut source = source_with_popular(drama(&[1, 2, 3]));
    let mut attempts = 0;
    source
        .expect_fetch_recommendations_for()
        .times(2)
        .returning(move |_| {
            attempts += 1;
            if attempts == 1 {
                Err(FetchError::Status {
                    status: 503,
                    body: "unavailable".into(),
                })
            } else {
                Ok(drama(&[7]))
            }
        });

    let session = RecommendationSession::new(Arc::new(source));
    session.start(PreferenceSnapshot::new()).await.unwrap();

    let err = session.like().await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::FetchFailure));
    assert_eq!(ids(&session.queued_movies()), vec![1, 2, 3]);
    assert!(session.liked_history().is_empty());
    assert_eq!(session.current_movie().map(|m| m.id), Some(1));
    assert_eq!(session.phase(), SessionPhase::Error);
    assert!(!session.is_loading());
    let last_error = session.last_error().unwrap();
    assert_eq!(last_error.kind, ErrorKind::FetchFailure);

    // Retrying the same action succeeds and clears the indicator.
    session.like().await.unwrap();
    assert_eq!(ids(&session.liked_history()), vec![1]);
    assert_eq!(ids(&session.queued_movies()), vec![2, 3, 7]);
    assert!(session.last_error().is_none());
    assert_eq!(session.phase(), SessionPhase::Presenting);
}

#[tokio::test]
async fn test_failed_seed_can_be_retried_by_skip() {
    let mut source = MockSource::new();
    let mut attempts = 0;
    source.expect_fetch_popular().times(2).returning(move || {
        attempts += 1;
        if attempts == 1 {
            Err(FetchError::Unavailable("offline".into()))
        } else {
            Ok(drama(&[1, 2]))
        }
    });

    let session = RecommendationSession::new(Arc::new(source));
    assert!(session.start(PreferenceSnapshot::new()).await.is_err());
    assert_eq!(session.phase(), SessionPhase::Error);
    assert!(session.current_movie().is_none());

    // Nothing queued and nothing decided yet, so skip re-seeds from the
    // popular list.
    let next = session.skip().await.unwrap();
    assert_eq!(next.map(|m| m.id), Some(1));
    assert_eq!(ids(&session.queued_movies()), vec![1, 2]);
    assert_eq!(session.phase(), SessionPhase::Presenting);
}

#[tokio::test]
async fn test_exhausted_queue_recovers_from_last_decided_movie() {
    let mut source = source_with_popular(drama(&[1]));
    let mut calls = 0;
    source
        .expect_fetch_recommendations_for()
        .with(eq(1))
        .times(2)
        .returning(move |_| {
            calls += 1;
            if calls == 1 { Ok(Vec::new()) } else { Ok(drama(&[5, 6])) }
        });

    let session = RecommendationSession::new(Arc::new(source));
    session.start(PreferenceSnapshot::new()).await.unwrap();
    session.skip().await.unwrap();
    assert_eq!(session.phase(), SessionPhase::Exhausted);

    let next = session.skip().await.unwrap();
    assert_eq!(next.map(|m| m.id), Some(5));
    assert!(session.liked_history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slow_fetch_times_out() {
    struct SlowSource;

    #[async_trait]
    impl MovieSource for SlowSource {
        async fn fetch_popular(&self) -> FetchResult<Vec<Movie>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(drama(&[1]))
        }

        async fn fetch_recommendations_for(&self, _movie_id: MovieId) -> FetchResult<Vec<Movie>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    let config = SessionConfig {
        fetch_timeout: Duration::from_secs(2),
    };
    let session = RecommendationSession::with_config(Arc::new(SlowSource), config);

    let err = session.start(PreferenceSnapshot::new()).await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Timeout));
    assert_eq!(session.last_error().map(|e| e.kind), Some(ErrorKind::Timeout));
    assert_eq!(session.phase(), SessionPhase::Error);
    assert!(session.queued_movies().is_empty());
}

/// Serves popular batches immediately but holds recommendation requests
/// until released. A released request answers with movie `100 + id`, or
/// fails when `fail` is set.
struct GatedSource {
    popular: Vec<Movie>,
    fail: bool,
    entered: Notify,
    release: Notify,
}

impl GatedSource {
    fn new(popular: Vec<Movie>) -> Self {
        Self {
            popular,
            fail: false,
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    fn failing(popular: Vec<Movie>) -> Self {
        Self {
            fail: true,
            ..Self::new(popular)
        }
    }
}

#[async_trait]
impl MovieSource for GatedSource {
    async fn fetch_popular(&self) -> FetchResult<Vec<Movie>> {
        Ok(self.popular.clone())
    }

    async fn fetch_recommendations_for(&self, movie_id: MovieId) -> FetchResult<Vec<Movie>> {
        self.entered.notify_one();
        self.release.notified().await;
        if self.fail {
            return Err(FetchError::Unavailable("connection reset".into()));
        }
        Ok(drama(&[100 + movie_id]))
    }
}

#[tokio::test]
async fn test_reset_discards_in_flight_backfill() {
    let source = Arc::new(GatedSource::new(drama(&[1, 2, 3])));
    let session = Arc::new(RecommendationSession::new(source.clone()));
    session.start(PreferenceSnapshot::new()).await.unwrap();

    let liking = {
        let session = session.clone();
        tokio::spawn(async move { session.like().await })
    };
    source.entered.notified().await;

    let restarting = {
        let session = session.clone();
        tokio::spawn(async move {
            session
                .complete_questionnaire([("genre", "Drama")])
                .await
        })
    };
    while session.phase() != SessionPhase::Loading {
        tokio::task::yield_now().await;
    }

    source.release.notify_one();
    liking.await.unwrap().unwrap();
    let first = restarting.await.unwrap().unwrap();

    // The like belonged to the old preferences and was dropped entirely.
    assert!(session.liked_history().is_empty());
    assert_eq!(first.map(|m| m.id), Some(1));
    assert_eq!(ids(&session.queued_movies()), vec![1, 2, 3]);
    assert_eq!(session.preferences().unwrap().genre(), Some("Drama"));
    assert_eq!(session.phase(), SessionPhase::Presenting);
}

#[tokio::test]
async fn test_stale_failure_after_reset_is_not_recorded() {
    let source = Arc::new(GatedSource::failing(drama(&[1, 2, 3])));
    let session = Arc::new(RecommendationSession::new(source.clone()));
    session.start(PreferenceSnapshot::new()).await.unwrap();

    let liking = {
        let session = session.clone();
        tokio::spawn(async move { session.like().await })
    };
    source.entered.notified().await;

    let restarting = {
        let session = session.clone();
        tokio::spawn(async move {
            session
                .complete_questionnaire([("genre", "Drama")])
                .await
        })
    };
    while session.phase() != SessionPhase::Loading {
        tokio::task::yield_now().await;
    }

    source.release.notify_one();
    let err = liking.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::FetchFailure));
    restarting.await.unwrap().unwrap();

    // The failure belonged to the old preferences, so the new queue shows
    // no error.
    assert!(session.last_error().is_none());
    assert_eq!(session.phase(), SessionPhase::Presenting);
    assert!(!session.is_loading());
    assert_eq!(ids(&session.queued_movies()), vec![1, 2, 3]);
    assert!(session.liked_history().is_empty());
}

#[tokio::test]
async fn test_overlapping_likes_run_one_at_a_time() {
    let source = Arc::new(GatedSource::new(drama(&[1, 2, 3])));
    let session = Arc::new(RecommendationSession::new(source.clone()));
    session.start(PreferenceSnapshot::new()).await.unwrap();

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.like().await })
    };
    source.entered.notified().await;

    let second = {
        let session = session.clone();
        tokio::spawn(async move { session.like().await })
    };
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    // The second like waits behind the first and has changed nothing.
    assert!(session.liked_history().is_empty());
    assert_eq!(ids(&session.queued_movies()), vec![1, 2, 3]);

    source.release.notify_one();
    assert_eq!(first.await.unwrap().unwrap().map(|m| m.id), Some(2));

    // The second like now fetches for the new head.
    source.entered.notified().await;
    source.release.notify_one();
    assert_eq!(second.await.unwrap().unwrap().map(|m| m.id), Some(3));

    assert_eq!(ids(&session.liked_history()), vec![1, 2]);
    assert_eq!(ids(&session.queued_movies()), vec![3, 101, 102]);
}

#[tokio::test]
async fn test_liked_history_survives_new_preferences() {
    let session = RecommendationSession::new(Arc::new(StaticSource::new(sample_movies())));
    session.start(PreferenceSnapshot::new()).await.unwrap();
    session.like().await.unwrap();
    session.like().await.unwrap();

    session
        .complete_questionnaire([("mood", "Happy")])
        .await
        .unwrap();

    assert_eq!(ids(&session.liked_history()), vec![1, 2]);
}
