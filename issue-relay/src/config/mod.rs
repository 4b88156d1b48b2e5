//! Configuration resolution.
//!
//! This module turns flags, environment variables, an optional config file
//! and an optional parameter store into a single [`Configuration`] that is
//! passed explicitly into each run.

mod configuration;
mod error;
mod loader;
mod parameter_store;

pub use configuration::{AccessToken, Configuration};
pub use error::ConfigError;
pub use loader::{
    ConfigLayer, ConfigLoader, DEFAULT_REGION, DESTINATION_ENV, INTERVAL_ENV, REGION_ENV,
    TOKEN_ENV,
};
pub use parameter_store::{
    ParameterNames, ParameterStore, SsmParameterStore, DEFAULT_DESTINATION_PARAMETER,
    DEFAULT_INTERVAL_PARAMETER, DEFAULT_TOKEN_PARAMETER,
};

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Loads AWS SDK settings (credentials chain, retries) pinned to `region`.
pub async fn load_aws_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}
