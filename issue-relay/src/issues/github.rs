//! GitHub-backed issue source.

use super::{FetchError, Issue, IssueSource};
use crate::config::AccessToken;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use octocrab::{Octocrab, Page};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};

/// Route listing issues assigned to the authenticated user across all repositories.
const ASSIGNED_ISSUES_ROUTE: &str = "/user/issues";

/// Results per page for the issue listing.
const RESULTS_PER_PAGE: u8 = 100;

/// Query parameters for the assigned-issues listing.
#[derive(Debug, Serialize)]
struct ListAssignedParams {
    filter: &'static str,
    state: &'static str,
    since: String,
    per_page: u8,
}

impl ListAssignedParams {
    fn new(since: DateTime<Utc>) -> Self {
        Self {
            filter: "assigned",
            state: "open",
            since: since.to_rfc3339_opts(SecondsFormat::Secs, true),
            per_page: RESULTS_PER_PAGE,
        }
    }
}

/// The subset of the GitHub issue payload that is read.
#[derive(Debug, Deserialize)]
struct GitHubIssue {
    title: String,
    html_url: String,
    #[serde(default)]
    repository: Option<GitHubRepository>,
}

#[derive(Debug, Deserialize)]
struct GitHubRepository {
    #[serde(default)]
    html_url: String,
}

impl From<GitHubIssue> for Issue {
    fn from(issue: GitHubIssue) -> Self {
        let repository_html_url = issue
            .repository
            .map(|repository| repository.html_url)
            .unwrap_or_default();
        Issue::new(issue.title, issue.html_url, repository_html_url)
    }
}

/// Lists assigned issues through the GitHub REST API.
///
/// A client is built per fetch from the token handed to
/// [`IssueSource::fetch_assigned_issues`].
#[derive(Debug, Clone, Default)]
pub struct GitHubIssueSource {
    base_uri: Option<String>,
}

impl GitHubIssueSource {
    /// Creates a source for `api.github.com`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source for a different API root (e.g., GitHub Enterprise).
    pub fn with_base_uri(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: Some(base_uri.into()),
        }
    }

    fn client(&self, token: &AccessToken) -> Result<Octocrab, octocrab::Error> {
        // octocrab and the AWS SDK enable different rustls providers; pin one.
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let mut builder = Octocrab::builder().personal_token(token.as_str().to_owned());
        if let Some(base_uri) = &self.base_uri {
            builder = builder.base_uri(base_uri.as_str())?;
        }
        builder.build()
    }
}

#[async_trait]
impl IssueSource for GitHubIssueSource {
    async fn fetch_assigned_issues(
        &self,
        token: &AccessToken,
        since: DateTime<Utc>,
    ) -> Result<Vec<Issue>, FetchError> {
        let span = info_span!("fetch_issues", since = %since);

        async {
            let octocrab = self.client(token)?;
            let params = ListAssignedParams::new(since);
            debug!(since = %params.since, "Listing assigned issues");

            let first: Page<GitHubIssue> = octocrab
                .get(ASSIGNED_ISSUES_ROUTE, Some(&params))
                .await?;
            let mut next = first.next.clone();
            let mut issues: Vec<Issue> = first.items.into_iter().map(Issue::from).collect();

            // Follow Link headers until the listing is exhausted
            while let Some(page) = octocrab.get_page::<GitHubIssue>(&next).await? {
                next = page.next.clone();
                issues.extend(page.items.into_iter().map(Issue::from));
            }

            info!(count = issues.len(), "Fetched assigned issues");
            Ok(issues)
        }
        .instrument(span)
        .await
    }
}
