//! Issue fetch error types.

use thiserror::Error;

/// The issue source call failed.
///
/// Transport, authentication and decoding failures are not distinguished;
/// the underlying cause is kept as the error source.
#[derive(Debug, Error)]
#[error("Failed to fetch assigned issues: {source}")]
pub struct FetchError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl FetchError {
    /// Wraps an underlying failure.
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            source: source.into(),
        }
    }
}

impl From<octocrab::Error> for FetchError {
    fn from(error: octocrab::Error) -> Self {
        Self::new(error)
    }
}
