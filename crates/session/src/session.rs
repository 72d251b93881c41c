//! # Recommendation Session
//!
//! Coordinates one user's swipe session:
//! 1. Capture preferences and seed the queue from the popular list
//! 2. On like/skip, plan the backfill the queue needs
//! 3. Fetch it (bounded by a timeout) and filter it against the preferences
//! 4. Commit the decision and the filtered batch in one step
//!
//! ## Concurrency
//!
//! Like, skip and seed are serialized by an async action lock that is held
//! across the fetch, so a decision is always planned against the state it
//! will be committed to. The state itself sits behind a short synchronous
//! lock that is never held across an await, which keeps the read accessors
//! usable while a fetch is in flight.
//!
//! Completing the questionnaire bumps a generation counter *before* waiting
//! for the action lock. Any in-flight action that finishes afterwards sees a
//! newer generation and discards its result.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use catalog::Movie;
use pipeline::{FilterPipeline, PreferenceSnapshot};
use sources::{FetchError, FetchResult, MovieSource};
use tracing::{debug, info, warn};

use crate::error::{LastError, SessionError, SessionResult};
use crate::queue::{Backfill, Decision, RecommendationQueue};

/// Default bound on a single fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Deadline for each popular or recommendations fetch
    pub fetch_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Where the session is, from the presentation layer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No preferences yet; show the questionnaire
    AwaitingPreferences,
    /// Preferences captured, initial batch still loading
    Loading,
    /// A current movie is available
    Presenting,
    /// The queue ran dry and the last fetch brought nothing usable
    Exhausted,
    /// The last fetch failed; state is unchanged and the action may be retried
    Error,
}

#[derive(Debug)]
struct SessionState {
    preferences: Option<Arc<PreferenceSnapshot>>,
    queue: RecommendationQueue,
    phase: SessionPhase,
    loading: bool,
    last_error: Option<LastError>,
    generation: u64,
}

impl SessionState {
    fn new() -> Self {
        Self {
            preferences: None,
            queue: RecommendationQueue::new(),
            phase: SessionPhase::AwaitingPreferences,
            loading: false,
            last_error: None,
            generation: 0,
        }
    }

    fn settle_phase(&mut self) {
        self.phase = if self.queue.current().is_some() {
            SessionPhase::Presenting
        } else {
            SessionPhase::Exhausted
        };
    }
}

/// The unit of work run under the action lock.
#[derive(Debug, Clone, Copy)]
enum Step {
    Seed { generation: u64 },
    Decide(Decision),
}

/// One user's recommendation session over a [`MovieSource`].
pub struct RecommendationSession<S: MovieSource + ?Sized> {
    source: Arc<S>,
    filter_pipeline: FilterPipeline,
    config: SessionConfig,
    actions: tokio::sync::Mutex<()>,
    state: Mutex<SessionState>,
}

impl<S: MovieSource + ?Sized> RecommendationSession<S> {
    /// Create a session using the standard filter pipeline and default config
    pub fn new(source: Arc<S>) -> Self {
        Self::with_config(source, SessionConfig::default())
    }

    pub fn with_config(source: Arc<S>, config: SessionConfig) -> Self {
        Self {
            source,
            filter_pipeline: FilterPipeline::standard(),
            config,
            actions: tokio::sync::Mutex::new(()),
            state: Mutex::new(SessionState::new()),
        }
    }

    /// Replace the filter pipeline (builder style)
    pub fn with_filter_pipeline(mut self, filter_pipeline: FilterPipeline) -> Self {
        self.filter_pipeline = filter_pipeline;
        self
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Capture the questionnaire answers and seed the queue.
    ///
    /// Unknown keys and unparseable values are tolerated; see
    /// [`PreferenceSnapshot::from_answers`].
    pub async fn complete_questionnaire<I, K, V>(&self, answers: I) -> SessionResult<Option<Movie>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.start(PreferenceSnapshot::from_answers(answers)).await
    }

    /// Replace the preferences and seed the queue from the popular list.
    ///
    /// Queued movies are discarded; liked history is kept. Any action still
    /// waiting on a fetch has its result dropped.
    pub async fn start(&self, preferences: PreferenceSnapshot) -> SessionResult<Option<Movie>> {
        let generation = {
            let mut state = self.state();
            state.generation += 1;
            state.preferences = Some(Arc::new(preferences));
            state.queue.reset();
            state.phase = SessionPhase::Loading;
            state.loading = true;
            state.last_error = None;
            state.generation
        };
        info!("Preferences captured (generation {})", generation);

        let _guard = self.actions.lock().await;
        self.run(Step::Seed { generation }).await
    }

    /// Like the current movie, then advance.
    pub async fn like(&self) -> SessionResult<Option<Movie>> {
        let _guard = self.actions.lock().await;
        self.run(Step::Decide(Decision::Like)).await
    }

    /// Skip the current movie, then advance.
    pub async fn skip(&self) -> SessionResult<Option<Movie>> {
        let _guard = self.actions.lock().await;
        self.run(Step::Decide(Decision::Skip)).await
    }

    // ========================================================================
    // Observation
    // ========================================================================

    pub fn current_movie(&self) -> Option<Movie> {
        self.state().queue.current().cloned()
    }

    /// Liked movies, oldest first.
    pub fn liked_history(&self) -> Vec<Movie> {
        self.state().queue.liked().to_vec()
    }

    /// Everything still queued, head first.
    pub fn queued_movies(&self) -> Vec<Movie> {
        self.state().queue.movies().cloned().collect()
    }

    pub fn queue_len(&self) -> usize {
        self.state().queue.len()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn last_error(&self) -> Option<LastError> {
        self.state().last_error.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state().phase
    }

    pub fn preferences(&self) -> Option<PreferenceSnapshot> {
        self.state().preferences.as_deref().cloned()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Plan, fetch, filter and commit one step. Caller holds the action lock.
    async fn run(&self, step: Step) -> SessionResult<Option<Movie>> {
        let (generation, preferences, backfill) = {
            let mut state = self.state();
            let Some(preferences) = state.preferences.clone() else {
                return Err(SessionError::AwaitingPreferences);
            };
            let backfill = match step {
                Step::Seed { generation } if generation != state.generation => {
                    debug!("Seed for generation {} superseded", generation);
                    return Ok(state.queue.current().cloned());
                }
                Step::Seed { .. } => Some(Backfill::Popular),
                Step::Decide(decision) => state.queue.plan(decision),
            };
            if backfill.is_some() {
                state.loading = true;
            }
            (state.generation, preferences, backfill)
        };

        let batch = match backfill {
            Some(backfill) => match self.fetch(backfill).await {
                Ok(candidates) => self.filter_pipeline.apply(candidates, &preferences),
                Err(e) => return Err(self.record_failure(generation, e)),
            },
            None => Vec::new(),
        };

        let mut state = self.state();
        if state.generation != generation {
            debug!(
                "Discarding {:?} result from generation {} (now {})",
                step, generation, state.generation
            );
            return Ok(state.queue.current().cloned());
        }

        match step {
            Step::Seed { .. } => state.queue.seed(batch),
            Step::Decide(decision) => {
                if let (Decision::Like, Some(movie)) = (decision, state.queue.current()) {
                    info!("Liked '{}' ({})", movie.title, movie.id);
                }
                state.queue.commit(decision, batch);
            }
        }
        state.loading = false;
        state.last_error = None;
        state.settle_phase();

        Ok(state.queue.current().cloned())
    }

    async fn fetch(&self, backfill: Backfill) -> FetchResult<Vec<Movie>> {
        let start_time = Instant::now();
        let timeout = self.config.fetch_timeout;

        let request = async {
            match backfill {
                Backfill::Popular => self.source.fetch_popular().await,
                Backfill::Recommendations(movie_id) => {
                    self.source.fetch_recommendations_for(movie_id).await
                }
            }
        };

        let candidates = match tokio::time::timeout(timeout, request).await {
            Ok(result) => result?,
            Err(_) => return Err(FetchError::Timeout(timeout)),
        };
        debug!(
            "Fetched {} candidates for {:?} in {:.2?}",
            candidates.len(),
            backfill,
            start_time.elapsed()
        );
        Ok(candidates)
    }

    /// Flag a failed fetch. The queue and history are left untouched.
    fn record_failure(&self, generation: u64, error: FetchError) -> SessionError {
        let mut state = self.state();
        if state.generation == generation {
            warn!("Fetch failed: {}", error);
            state.loading = false;
            state.last_error = Some(LastError::from_fetch(&error));
            state.phase = SessionPhase::Error;
        } else {
            debug!("Ignoring failure from superseded generation {}", generation);
        }
        SessionError::Fetch(error)
    }
}
