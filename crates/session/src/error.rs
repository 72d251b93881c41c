//! Error types for recommendation sessions.

use sources::FetchError;
use thiserror::Error;

/// Errors returned by session actions.
///
/// Fetch failures are recoverable: the session state is left exactly as
/// it was before the action, and the action can simply be retried.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to fetch movies: {0}")]
    Fetch(#[from] FetchError),

    #[error("Preferences have not been set yet")]
    AwaitingPreferences,
}

impl SessionError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SessionError::Fetch(e) if e.is_timeout() => Some(ErrorKind::Timeout),
            SessionError::Fetch(_) => Some(ErrorKind::FetchFailure),
            SessionError::AwaitingPreferences => None,
        }
    }
}

/// Category of the error a session is currently flagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network error or non-success response
    FetchFailure,
    /// No response in time (handled exactly like a fetch failure)
    Timeout,
}

/// The error indicator exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub kind: ErrorKind,
    pub message: String,
}

impl LastError {
    pub(crate) fn from_fetch(error: &FetchError) -> Self {
        let kind = if error.is_timeout() {
            ErrorKind::Timeout
        } else {
            ErrorKind::FetchFailure
        };
        Self {
            kind,
            message: error.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type SessionResult<T> = std::result::Result<T, SessionError>;
