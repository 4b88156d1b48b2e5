//! Run summary types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Identifier of the trigger event that started the run.
    pub invocation_id: String,

    /// Start of the lookback window.
    pub since: DateTime<Utc>,

    /// Number of issues the source returned.
    pub issues_found: usize,

    /// Number of issues dispatched.
    pub dispatched: usize,
}

impl RunSummary {
    /// Returns true if no issues were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues_found == 0
    }
}
