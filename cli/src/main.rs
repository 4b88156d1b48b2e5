//! CLI for issue-relay.
//!
//! Polls GitHub for issues assigned to you that changed within the lookback
//! window and forwards each one to a card-creation Lambda function.

use clap::Parser;
use issue_relay::config::{
    DEFAULT_DESTINATION_PARAMETER, DEFAULT_INTERVAL_PARAMETER, DEFAULT_TOKEN_PARAMETER,
};
use issue_relay::{
    load_aws_config, parse_interval, run_pipeline, run_pipeline_after, ConfigError, ConfigLayer,
    ConfigLoader, Configuration, DryRunInvoker, GitHubIssueSource, IssueSource, LambdaInvoker,
    ParameterNames, PipelineError, RemoteInvoker, RunSummary, SsmParameterStore, TriggerError,
    TriggerEvent,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Relay - Forward recently updated GitHub issues assigned to you to a card-creation function.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Lookback interval in minutes (takes precedence over ISSUE_RELAY_INTERVAL).
    #[arg(long)]
    interval: Option<String>,

    /// Card function name or ARN (takes precedence over ISSUE_RELAY_DESTINATION).
    #[arg(long)]
    destination: Option<String>,

    /// Region of the card function (takes precedence over AWS_REGION).
    #[arg(long)]
    region: Option<String>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read settings not found elsewhere from AWS SSM Parameter Store.
    #[arg(long)]
    parameter_store: bool,

    /// Parameter holding the GitHub token.
    #[arg(long, default_value = DEFAULT_TOKEN_PARAMETER)]
    token_parameter: String,

    /// Parameter holding the lookback interval.
    #[arg(long, default_value = DEFAULT_INTERVAL_PARAMETER)]
    interval_parameter: String,

    /// Parameter holding the card function ARN.
    #[arg(long, default_value = DEFAULT_DESTINATION_PARAMETER)]
    destination_parameter: String,

    /// GitHub API root, for GitHub Enterprise.
    #[arg(long)]
    github_api_url: Option<String>,

    /// Scheduled event JSON to process (`-` reads stdin). Defaults to the current time.
    #[arg(long, conflicts_with = "watch")]
    event: Option<PathBuf>,

    /// Keep running, one run every interval.
    #[arg(long)]
    watch: bool,

    /// Print card payloads instead of invoking the function.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // Resolve configuration
    let config = match load_configuration(&args).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    let source = match &args.github_api_url {
        Some(url) => GitHubIssueSource::with_base_uri(url.clone()),
        None => GitHubIssueSource::new(),
    };

    let invoker: Box<dyn RemoteInvoker> = if args.dry_run {
        Box::new(DryRunInvoker)
    } else {
        let sdk_config = load_aws_config(config.destination().region()).await;
        Box::new(LambdaInvoker::new(sdk_config))
    };

    if args.watch {
        return watch(&config, &source, invoker.as_ref()).await;
    }

    // Run the main logic
    let event = match read_event(args.event.as_deref()) {
        Ok(event) => event,
        Err(e) => {
            error!(error = %e, "Invalid trigger event");
            return ExitCode::from(2);
        }
    };

    match run_pipeline(&event, &config, &source, invoker.as_ref()).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(invocation_id = %event.id, error = %e, "Run failed");
            exit_code(&e)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        // Use compact formatting without module target paths for cleaner output
        .with(fmt::layer().compact().with_target(false))
        // Allow runtime log filtering via RUST_LOG env var (e.g., RUST_LOG=debug)
        // Falls back to "info" level if RUST_LOG is not set or invalid
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        // Register as the global default subscriber
        .init();
}

/// Resolves settings from flags, environment, config file and, if enabled, SSM.
async fn load_configuration(args: &Args) -> Result<Configuration, ConfigError> {
    let mut loader = ConfigLoader::from_env().with_explicit(ConfigLayer {
        token: args.token.clone().filter(|token| !token.is_empty()),
        interval: args.interval.clone(),
        destination: args.destination.clone(),
        region: args.region.clone(),
    });
    if let Some(path) = &args.config {
        loader = loader.with_config_file(path);
    }

    if !args.parameter_store {
        return loader.load();
    }

    let sdk_config = load_aws_config(&loader.region()?).await;
    let store = SsmParameterStore::new(&sdk_config);
    let names = ParameterNames {
        token: args.token_parameter.clone(),
        interval: args.interval_parameter.clone(),
        destination: args.destination_parameter.clone(),
    };
    loader.load_with_store(&store, &names).await
}

/// Reads the trigger event from a file or stdin, or creates one for now.
fn read_event(path: Option<&Path>) -> Result<TriggerEvent, TriggerError> {
    match path {
        None => Ok(TriggerEvent::now()),
        Some(path) if path == Path::new("-") => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .map_err(|source| TriggerError::IoError {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            TriggerEvent::from_json(&json)
        }
        Some(path) => TriggerEvent::from_path(path),
    }
}

/// Runs the pipeline once per interval until interrupted.
///
/// A failed run is logged and the next tick proceeds as usual. Each window
/// reaches back at least to the previous tick's reference time, so a run that
/// overruns the period leaves no gap.
async fn watch(
    config: &Configuration,
    source: &dyn IssueSource,
    invoker: &dyn RemoteInvoker,
) -> ExitCode {
    let interval = match parse_interval(config.interval()) {
        Ok(interval) => interval,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };
    let Some(period) = interval.period() else {
        error!(%interval, "Watch mode needs an interval of at least one minute");
        return ExitCode::from(2);
    };

    info!(%interval, "Watching for assigned issues");
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut previous = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                return ExitCode::from(0);
            }
        }

        let event = TriggerEvent::now();
        match run_pipeline_after(&event, config, previous, source, invoker).await {
            Ok(summary) => print_summary(&summary),
            Err(e) => error!(invocation_id = %event.id, error = %e, "Run failed"),
        }
        previous = Some(event.time);
    }
}

/// Maps a failed run to the process exit code.
fn exit_code(error: &PipelineError) -> ExitCode {
    match error {
        PipelineError::Config(_) => ExitCode::from(2),
        PipelineError::Fetch(_) | PipelineError::Dispatch(_) => ExitCode::from(1),
    }
}

/// Prints the run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Invocation: {}", summary.invocation_id);
    println!("  Issues updated since: {}", summary.since);
    println!("  Issues found: {}", summary.issues_found);
    println!("  Cards dispatched: {}", summary.dispatched);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn token_falls_back_to_env_without_showing_it() {
        let command = Args::command();
        let token = command
            .get_arguments()
            .find(|arg| arg.get_id() == "token")
            .unwrap();

        assert_eq!(token.get_env(), Some(std::ffi::OsStr::new("GITHUB_TOKEN")));
        assert!(token.is_hide_env_values_set());
    }

    #[test]
    fn event_conflicts_with_watch() {
        let result = Args::try_parse_from(["issue-relay", "--watch", "--event", "event.json"]);
        assert!(result.is_err());
    }
}
