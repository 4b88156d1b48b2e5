//! Card dispatch to the downstream function.
//!
//! Each issue becomes one [`NotificationEnvelope`] and one invocation. Issues
//! are sent strictly one at a time, in order, and the loop stops at the first
//! failure.

mod destination;
mod dry_run;
mod error;
mod invoker;
mod lambda;

pub use destination::Destination;
pub use dry_run::DryRunInvoker;
pub use error::{DispatchError, InvokeError};
pub use invoker::RemoteInvoker;
pub use lambda::LambdaInvoker;

use crate::envelope::NotificationEnvelope;
use crate::issues::Issue;
use tracing::{error, info, info_span, Instrument};

/// Sends one card request per issue to `destination`.
///
/// # Returns
///
/// The number of issues dispatched, which equals `issues.len()` on success.
///
/// # Errors
///
/// Returns [`DispatchError`] for the first issue that can't be dispatched.
/// Later issues are never attempted and earlier ones are not rolled back.
pub async fn dispatch_issues<R>(
    invoker: &R,
    destination: &Destination,
    issues: &[Issue],
) -> Result<usize, DispatchError>
where
    R: RemoteInvoker + ?Sized,
{
    let span = info_span!(
        "dispatch",
        function = %destination.address(),
        region = %destination.region(),
        count = issues.len()
    );

    async {
        let mut dispatched = 0;

        for issue in issues {
            let payload = NotificationEnvelope::for_issue(issue)
                .to_payload()
                .map_err(|source| DispatchError::Encode {
                    dispatched,
                    title: issue.title.clone(),
                    source,
                })?;

            if let Err(source) = invoker.invoke(destination, &payload).await {
                error!(
                    title = %issue.title,
                    dispatched,
                    error = %source,
                    "Failed to create card"
                );
                return Err(DispatchError::Invoke {
                    dispatched,
                    title: issue.title.clone(),
                    source,
                });
            }

            dispatched += 1;
            info!(title = %issue.title, "Created a card");
        }

        info!(count = dispatched, "Sent issues to card function");
        Ok(dispatched)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records payloads and fails on the `fail_at`-th call (1-indexed).
    #[derive(Default)]
    struct RecordingInvoker {
        fail_at: Option<usize>,
        calls: Mutex<Vec<serde_json::Value>>,
    }

    impl RecordingInvoker {
        fn failing_at(call: usize) -> Self {
            Self {
                fail_at: Some(call),
                ..Default::default()
            }
        }

        fn titles(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|payload| payload["Trello"]["Title"].as_str().unwrap().to_string())
                .collect()
        }
    }

    #[async_trait]
    impl RemoteInvoker for RecordingInvoker {
        async fn invoke(
            &self,
            _destination: &Destination,
            payload: &serde_json::Value,
        ) -> Result<(), InvokeError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(payload.clone());
            if self.fail_at == Some(calls.len()) {
                return Err(InvokeError::request("connection reset"));
            }
            Ok(())
        }
    }

    fn destination() -> Destination {
        Destination::new("arn:aws:lambda:us-west-2:123456789012:function:cards", "us-west-2")
    }

    fn issues(count: usize) -> Vec<Issue> {
        (1..=count)
            .map(|n| {
                Issue::new(
                    format!("Issue {n}"),
                    format!("https://github.com/acme/widgets/issues/{n}"),
                    "https://github.com/acme/widgets",
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn dispatches_every_issue_in_order() {
        let invoker = RecordingInvoker::default();

        let dispatched = dispatch_issues(&invoker, &destination(), &issues(3))
            .await
            .unwrap();

        assert_eq!(dispatched, 3);
        assert_eq!(invoker.titles(), vec!["Issue 1", "Issue 2", "Issue 3"]);
    }

    #[tokio::test]
    async fn no_issues_means_no_invocations() {
        let invoker = RecordingInvoker::default();

        let dispatched = dispatch_issues(&invoker, &destination(), &[]).await.unwrap();

        assert_eq!(dispatched, 0);
        assert!(invoker.titles().is_empty());
    }

    #[tokio::test]
    async fn stops_at_first_failure() {
        let invoker = RecordingInvoker::failing_at(2);

        let error = dispatch_issues(&invoker, &destination(), &issues(4))
            .await
            .unwrap_err();

        assert_eq!(invoker.titles(), vec!["Issue 1", "Issue 2"]);
        assert_eq!(error.dispatched(), 1);
        match error {
            DispatchError::Invoke { title, .. } => assert_eq!(title, "Issue 2"),
            other => panic!("expected invoke error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_on_first_issue_dispatches_nothing() {
        let invoker = RecordingInvoker::failing_at(1);

        let error = dispatch_issues(&invoker, &destination(), &issues(2))
            .await
            .unwrap_err();

        assert_eq!(invoker.titles().len(), 1);
        assert_eq!(error.dispatched(), 0);
    }

    #[tokio::test]
    async fn sends_envelope_payload() {
        let invoker = RecordingInvoker::default();

        dispatch_issues(&invoker, &destination(), &issues(1))
            .await
            .unwrap();

        let calls = invoker.calls.lock().unwrap();
        assert_eq!(calls[0]["EventVersion"], "1.0");
        assert_eq!(calls[0]["EventSource"], "aws:lambda");
        assert_eq!(
            calls[0]["Trello"]["Description"],
            "Repository: https://github.com/acme/widgets\nDirect link: https://github.com/acme/widgets/issues/1"
        );
    }
}
