//! Recommendation sessions.
//!
//! This crate provides:
//! - RecommendationQueue: the pure queue, liked history and backfill planning
//! - RecommendationSession: async like/skip/seed over a movie source
//! - SessionError and the LastError indicator for presentation layers
//!
//! ## Example Usage
//! ```ignore
//! use std::sync::Arc;
//! use session::RecommendationSession;
//! use sources::StaticSource;
//!
//! let session = RecommendationSession::new(Arc::new(StaticSource::sample()));
//! let first = session
//!     .complete_questionnaire([("mood", "Excited"), ("rating", "Above 6")])
//!     .await?;
//! let next = session.like().await?;
//! ```

pub mod error;
pub mod queue;
pub mod session;

// Re-export main types
pub use error::{ErrorKind, LastError, SessionError, SessionResult};
pub use queue::{Backfill, Decision, LOW_WATER_MARK, RecommendationQueue};
pub use session::{DEFAULT_FETCH_TIMEOUT, RecommendationSession, SessionConfig, SessionPhase};
