//! Assigned issue retrieval.
//!
//! This module lists issues assigned to the authenticated user that were
//! updated within the lookback window.

mod error;
mod github;
mod issue;
mod source;

pub use error::FetchError;
pub use github::GitHubIssueSource;
pub use issue::Issue;
pub use source::IssueSource;
