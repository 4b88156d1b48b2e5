//! Assigned issue information.

use serde::{Deserialize, Serialize};

/// An issue assigned to the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue title.
    pub title: String,

    /// Browser URL of the issue.
    pub html_url: String,

    /// Browser URL of the repository the issue belongs to.
    pub repository_html_url: String,
}

impl Issue {
    /// Creates a new issue record.
    pub fn new(
        title: impl Into<String>,
        html_url: impl Into<String>,
        repository_html_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            html_url: html_url.into(),
            repository_html_url: repository_html_url.into(),
        }
    }
}
