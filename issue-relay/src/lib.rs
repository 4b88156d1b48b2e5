#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod issues;
pub mod pipeline;
pub mod summary;
pub mod trigger;
pub mod window;

pub use config::{
    load_aws_config, AccessToken, ConfigError, ConfigLayer, ConfigLoader, Configuration,
    ParameterNames, ParameterStore, SsmParameterStore,
};
pub use dispatch::{
    dispatch_issues, Destination, DispatchError, DryRunInvoker, InvokeError, LambdaInvoker,
    RemoteInvoker,
};
pub use envelope::{describe_issue, CardEvent, NotificationEnvelope};
pub use issues::{FetchError, GitHubIssueSource, Issue, IssueSource};
pub use pipeline::{run_pipeline, run_pipeline_after, PipelineError};
pub use summary::RunSummary;
pub use trigger::{TriggerError, TriggerEvent};
pub use window::{continuing_since, lookback_since, parse_interval, Interval};
