//! Runs one trigger through window, fetch and dispatch.
//!
//! A run moves `Idle → WindowComputed → IssuesFetched → Dispatching(i)` and
//! ends in either a [`RunSummary`] or a [`PipelineError`]. Nothing is carried
//! between runs, except the previous reference time a caller may pass to
//! [`run_pipeline_after`].

use crate::config::{ConfigError, Configuration};
use crate::dispatch::{dispatch_issues, DispatchError, RemoteInvoker};
use crate::issues::{FetchError, IssueSource};
use crate::summary::RunSummary;
use crate::trigger::TriggerEvent;
use crate::window::{continuing_since, parse_interval};
use chrono::{DateTime, Utc};
use tracing::{info, info_span, Instrument};

/// Errors that end a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The interval could not be turned into a lookback window.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The issue source call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A downstream invocation failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Processes a single trigger event.
///
/// Computes the lookback window, fetches the issues updated within it and
/// dispatches one card per issue. The interval is validated before any
/// network call is made.
///
/// # Errors
///
/// Returns [`PipelineError`] on the first failure. No step is retried.
pub async fn run_pipeline<S, R>(
    event: &TriggerEvent,
    config: &Configuration,
    source: &S,
    invoker: &R,
) -> Result<RunSummary, PipelineError>
where
    S: IssueSource + ?Sized,
    R: RemoteInvoker + ?Sized,
{
    run_pipeline_after(event, config, None, source, invoker).await
}

/// Processes a trigger event that follows an earlier run.
///
/// Identical to [`run_pipeline`] when `previous` is `None`. Otherwise the
/// window reaches back to `previous` (the earlier run's reference time) if
/// that is further back than the configured interval.
///
/// # Errors
///
/// Returns [`PipelineError`] on the first failure. No step is retried.
pub async fn run_pipeline_after<S, R>(
    event: &TriggerEvent,
    config: &Configuration,
    previous: Option<DateTime<Utc>>,
    source: &S,
    invoker: &R,
) -> Result<RunSummary, PipelineError>
where
    S: IssueSource + ?Sized,
    R: RemoteInvoker + ?Sized,
{
    let span = info_span!("run", invocation_id = %event.id);

    async {
        info!(reference = %event.time, "Processing trigger");

        let interval = parse_interval(config.interval())?;
        let since = continuing_since(event.time, interval, previous)?;
        info!(%since, %interval, "Checking issues for the current user");

        let issues = source.fetch_assigned_issues(config.token(), since).await?;
        if issues.is_empty() {
            info!("There are no new issues");
        }

        let dispatched = dispatch_issues(invoker, config.destination(), &issues).await?;

        Ok(RunSummary {
            invocation_id: event.id.clone(),
            since,
            issues_found: issues.len(),
            dispatched,
        })
    }
    .instrument(span)
    .await
}
