//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while resolving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The lookback interval is not a non-negative whole number of minutes.
    #[error("Invalid interval '{value}': {source}")]
    InvalidInterval {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The lookback window start is not a representable timestamp.
    #[error("Interval of {minutes} minutes is out of range")]
    IntervalOutOfRange { minutes: u64 },

    /// No source provided a required setting.
    #[error("Missing required setting: {name}")]
    Missing { name: &'static str },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Parameter store request failed.
    #[error("Parameter store error: {source}")]
    ParameterStore {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
