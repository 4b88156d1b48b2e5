//! Secret lookup from a parameter store.

use super::ConfigError;
use async_trait::async_trait;
use aws_config::SdkConfig;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Parameter name holding the GitHub token.
pub const DEFAULT_TOKEN_PARAMETER: &str = "/github/apptoken";

/// Parameter name holding the lookback interval.
pub const DEFAULT_INTERVAL_PARAMETER: &str = "/github/interval";

/// Parameter name holding the card function ARN.
pub const DEFAULT_DESTINATION_PARAMETER: &str = "/trello/arn";

/// Names of the parameters each setting is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterNames {
    /// Parameter holding the GitHub token.
    pub token: String,
    /// Parameter holding the interval in minutes.
    pub interval: String,
    /// Parameter holding the destination function address.
    pub destination: String,
}

impl Default for ParameterNames {
    fn default() -> Self {
        Self {
            token: DEFAULT_TOKEN_PARAMETER.to_string(),
            interval: DEFAULT_INTERVAL_PARAMETER.to_string(),
            destination: DEFAULT_DESTINATION_PARAMETER.to_string(),
        }
    }
}

/// A store of named, possibly encrypted, string parameters.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetches decrypted values for `names`.
    ///
    /// Names the store doesn't know are absent from the returned map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParameterStore`] if the request fails.
    async fn get_parameters(&self, names: &[String])
        -> Result<HashMap<String, String>, ConfigError>;
}

/// AWS Systems Manager Parameter Store.
#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    /// Creates a store client from an SDK config.
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameters(
        &self,
        names: &[String],
    ) -> Result<HashMap<String, String>, ConfigError> {
        debug!(?names, "Fetching parameters");

        let output = self
            .client
            .get_parameters()
            .set_names(Some(names.to_vec()))
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| ConfigError::ParameterStore {
                source: Box::new(e.into_service_error()),
            })?;

        let values: HashMap<String, String> = output
            .parameters()
            .iter()
            .filter_map(|parameter| {
                Some((
                    parameter.name()?.to_string(),
                    parameter.value()?.to_string(),
                ))
            })
            .collect();

        if values.len() < names.len() {
            warn!(
                requested = names.len(),
                found = values.len(),
                "Some parameters were not found"
            );
        }

        Ok(values)
    }
}
