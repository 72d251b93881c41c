//! Error types for movie sources.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while fetching from a movie source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure, or a response body that did not decode
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// No answer within the allowed time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The source cannot serve requests at all
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

impl FetchError {
    /// True for both our own deadline and the HTTP client's.
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Timeout(_) => true,
            FetchError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_detection() {
        assert!(FetchError::Timeout(Duration::from_secs(1)).is_timeout());
        assert!(!FetchError::Unavailable("down".into()).is_timeout());
        assert!(
            !FetchError::Status {
                status: 503,
                body: String::new()
            }
            .is_timeout()
        );
    }

    #[test]
    fn test_status_message() {
        let err = FetchError::Status {
            status: 401,
            body: "Invalid API key".to_string(),
        };
        assert_eq!(err.to_string(), "Provider returned status 401: Invalid API key");
    }
}
