//! Resolved run configuration.

use crate::dispatch::Destination;
use std::fmt;

/// A GitHub access token. Redacted when debug-printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Configuration for one pipeline run.
///
/// The interval is kept as provided and validated when the lookback window is
/// computed, so an invalid value fails the run before any network call.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// GitHub token whose owner's assigned issues are polled.
    token: AccessToken,
    /// Lookback interval in minutes, unparsed.
    interval: String,
    /// Card-creation function to invoke.
    destination: Destination,
}

impl Configuration {
    /// Creates a configuration.
    pub fn new(token: AccessToken, interval: impl Into<String>, destination: Destination) -> Self {
        Self {
            token,
            interval: interval.into(),
            destination,
        }
    }

    /// Returns the GitHub token.
    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Returns the raw interval value.
    pub fn interval(&self) -> &str {
        &self.interval
    }

    /// Returns the destination function.
    pub fn destination(&self) -> &Destination {
        &self.destination
    }
}
