//! Scheduled trigger events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a trigger event.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Failed to read the event document.
    #[error("Failed to read event '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The event document is not a valid scheduled event.
    #[error("Failed to parse event: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// A single firing of the schedule.
///
/// Deserializes from a CloudWatch/EventBridge scheduled event. Fields other
/// than the ones below (`account`, `detail`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TriggerEvent {
    /// Invocation identifier, used only for logging.
    pub id: String,

    /// Reference time the lookback window ends at.
    pub time: DateTime<Utc>,

    /// Event type (e.g., "Scheduled Event").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_type: Option<String>,

    /// Event source (e.g., "aws.events").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Region the schedule fired in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Resources that fired the event, usually the schedule rule ARN.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
}

impl TriggerEvent {
    /// Creates an event with the given identifier and reference time.
    pub fn new(id: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            time,
            detail_type: None,
            source: None,
            region: None,
            resources: Vec::new(),
        }
    }

    /// Creates an event for the current instant with a locally generated identifier.
    #[must_use]
    pub fn now() -> Self {
        let time = Utc::now();
        Self::new(format!("local-{}", time.timestamp_millis()), time)
    }

    /// Parses an event from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::ParseError`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, TriggerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses an event document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError`] if the file can't be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, TriggerError> {
        let json = std::fs::read_to_string(path).map_err(|source| TriggerError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}
