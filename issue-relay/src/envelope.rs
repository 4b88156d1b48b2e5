//! Notification envelopes sent to the card-creation function.
//!
//! The serialized shape is the wire contract with the downstream function:
//!
//! ```json
//! {
//!   "EventVersion": "1.0",
//!   "EventSource": "aws:lambda",
//!   "Trello": {
//!     "Title": "Bug",
//!     "Description": "Repository: https://x\nDirect link: https://x/issues/1"
//!   }
//! }
//! ```

use crate::issues::Issue;
use serde::{Deserialize, Serialize};

/// Envelope schema version.
pub const EVENT_VERSION: &str = "1.0";

/// Origin recorded in every envelope.
pub const EVENT_SOURCE: &str = "aws:lambda";

/// Versioned wrapper around a single card request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationEnvelope {
    /// Always [`EVENT_VERSION`].
    pub event_version: String,

    /// Always [`EVENT_SOURCE`].
    pub event_source: String,

    /// The card to create.
    #[serde(rename = "Trello")]
    pub card: CardEvent,
}

/// Card contents derived from one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CardEvent {
    /// Card title (the issue title).
    pub title: String,

    /// Card description linking back to the repository and the issue.
    pub description: String,
}

impl NotificationEnvelope {
    /// Builds the envelope for an issue.
    #[must_use]
    pub fn for_issue(issue: &Issue) -> Self {
        Self {
            event_version: EVENT_VERSION.to_string(),
            event_source: EVENT_SOURCE.to_string(),
            card: CardEvent {
                title: issue.title.clone(),
                description: describe_issue(issue),
            },
        }
    }

    /// Serializes the envelope into a transport-neutral JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Builds the two-line card description for an issue.
#[must_use]
pub fn describe_issue(issue: &Issue) -> String {
    format!(
        "Repository: {}\nDirect link: {}",
        issue.repository_html_url, issue.html_url
    )
}
