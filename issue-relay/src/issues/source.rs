//! Issue source abstraction.

use super::{FetchError, Issue};
use crate::config::AccessToken;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Provides issues assigned to the identity that owns a credential.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Returns issues assigned to the owner of `token` whose last update is at
    /// or after `since`, in the order the tracker returned them.
    ///
    /// An empty vector is a valid result.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] for any failure; callers don't retry.
    async fn fetch_assigned_issues(
        &self,
        token: &AccessToken,
        since: DateTime<Utc>,
    ) -> Result<Vec<Issue>, FetchError>;
}
