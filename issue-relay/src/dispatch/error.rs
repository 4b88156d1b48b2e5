//! Dispatch error types.

use thiserror::Error;

/// Errors raised by a single downstream invocation.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The invocation request did not complete.
    #[error("Invocation request failed: {source}")]
    Request {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The function ran but reported an error.
    #[error("Function returned {kind} error: {message}")]
    Function { kind: String, message: String },
}

impl InvokeError {
    /// Wraps a transport or service failure.
    pub fn request<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Request {
            source: source.into(),
        }
    }
}

/// Errors that stop a dispatch loop.
///
/// Issues dispatched before the failure stay dispatched; `dispatched` counts them.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The envelope could not be serialized.
    #[error("Failed to encode card for '{title}': {source}")]
    Encode {
        dispatched: usize,
        title: String,
        #[source]
        source: serde_json::Error,
    },

    /// The downstream invocation failed.
    #[error("Failed to create card for '{title}' after {dispatched} dispatched: {source}")]
    Invoke {
        dispatched: usize,
        title: String,
        #[source]
        source: InvokeError,
    },
}

impl DispatchError {
    /// Returns how many issues were dispatched before the failure.
    #[must_use]
    pub fn dispatched(&self) -> usize {
        match self {
            Self::Encode { dispatched, .. } | Self::Invoke { dispatched, .. } => *dispatched,
        }
    }
}
