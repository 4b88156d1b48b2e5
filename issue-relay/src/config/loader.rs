//! Layered configuration loading.
//!
//! Settings are resolved from these sources, first match wins:
//!
//! 1. explicit values (e.g., command-line flags)
//! 2. environment variables
//! 3. a TOML config file
//! 4. the parameter store, for settings still missing
//! 5. built-in defaults (region only)

use super::{AccessToken, ConfigError, Configuration, ParameterNames, ParameterStore};
use crate::dispatch::Destination;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable holding the GitHub token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable holding the lookback interval in minutes.
pub const INTERVAL_ENV: &str = "ISSUE_RELAY_INTERVAL";

/// Environment variable holding the destination function name or ARN.
pub const DESTINATION_ENV: &str = "ISSUE_RELAY_DESTINATION";

/// Environment variable holding the destination region.
pub const REGION_ENV: &str = "AWS_REGION";

/// Region used when no source provides one.
pub const DEFAULT_REGION: &str = "us-west-2";

/// A partial set of settings from a single source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    /// GitHub token.
    pub token: Option<String>,
    /// Lookback interval in minutes.
    pub interval: Option<String>,
    /// Destination function name or ARN.
    pub destination: Option<String>,
    /// Destination region.
    pub region: Option<String>,
}

impl ConfigLayer {
    /// Reads settings from the process environment. Empty values count as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            token: env_value(TOKEN_ENV),
            interval: env_value(INTERVAL_ENV),
            destination: env_value(DESTINATION_ENV),
            region: env_value(REGION_ENV),
        }
    }

    /// Reads settings from a TOML config file.
    ///
    /// ```toml
    /// [github]
    /// token = "ghp_..."
    /// interval = 15
    ///
    /// [destination]
    /// function = "arn:aws:lambda:us-west-2:123456789012:function:cards"
    /// region = "us-west-2"
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file can't be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(file.into())
    }

    /// Picks the values for `names` out of a parameter store response.
    #[must_use]
    pub fn from_parameters(values: &HashMap<String, String>, names: &ParameterNames) -> Self {
        Self {
            token: values.get(&names.token).cloned(),
            interval: values.get(&names.interval).cloned(),
            destination: values.get(&names.destination).cloned(),
            region: None,
        }
    }

    /// Fills settings missing from `self` with those from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            token: self.token.or(fallback.token),
            interval: self.interval.or(fallback.interval),
            destination: self.destination.or(fallback.destination),
            region: self.region.or(fallback.region),
        }
    }

    /// Returns the parameter names of the settings this layer lacks.
    fn missing_parameters(&self, names: &ParameterNames) -> Vec<String> {
        [
            (self.token.is_none(), &names.token),
            (self.interval.is_none(), &names.interval),
            (self.destination.is_none(), &names.destination),
        ]
        .into_iter()
        .filter(|(missing, _)| *missing)
        .map(|(_, name)| name.clone())
        .collect()
    }

    /// Builds the final configuration, applying the default region.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the token, interval or destination is unset.
    pub fn into_configuration(self) -> Result<Configuration, ConfigError> {
        let token = self.token.ok_or(ConfigError::Missing { name: "token" })?;
        let interval = self
            .interval
            .ok_or(ConfigError::Missing { name: "interval" })?;
        let destination = self
            .destination
            .ok_or(ConfigError::Missing { name: "destination" })?;
        let region = self.region.unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Configuration::new(
            AccessToken::new(token),
            interval,
            Destination::new(destination, region),
        ))
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// On-disk layout of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    github: GitHubSection,
    #[serde(default)]
    destination: DestinationSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct GitHubSection {
    token: Option<String>,
    interval: Option<IntervalValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct DestinationSection {
    function: Option<String>,
    region: Option<String>,
}

/// The interval may be written as a number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntervalValue {
    Minutes(i64),
    Text(String),
}

impl From<IntervalValue> for String {
    fn from(value: IntervalValue) -> Self {
        match value {
            IntervalValue::Minutes(minutes) => minutes.to_string(),
            IntervalValue::Text(text) => text,
        }
    }
}

impl From<ConfigFile> for ConfigLayer {
    fn from(file: ConfigFile) -> Self {
        Self {
            token: file.github.token,
            interval: file.github.interval.map(String::from),
            destination: file.destination.function,
            region: file.destination.region,
        }
    }
}

/// Resolves a [`Configuration`] from all configured sources.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    explicit: ConfigLayer,
    environment: ConfigLayer,
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader that captures the current environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            environment: ConfigLayer::from_env(),
            ..Default::default()
        }
    }

    /// Sets values that take precedence over every other source.
    #[must_use]
    pub fn with_explicit(mut self, explicit: ConfigLayer) -> Self {
        self.explicit = explicit;
        self
    }

    /// Sets a config file to read settings from.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Merges explicit values, environment and config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file can't be loaded.
    pub fn local_layer(&self) -> Result<ConfigLayer, ConfigError> {
        let file = match &self.config_file {
            Some(path) => {
                info!(path = %path.display(), "Loading config file");
                ConfigLayer::from_file(path)?
            }
            None => ConfigLayer::default(),
        };

        Ok(self
            .explicit
            .clone()
            .or(self.environment.clone())
            .or(file))
    }

    /// Returns the region from local sources, or the default region.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file can't be loaded.
    pub fn region(&self) -> Result<String, ConfigError> {
        Ok(self
            .local_layer()?
            .region
            .unwrap_or_else(|| DEFAULT_REGION.to_string()))
    }

    /// Resolves the configuration from local sources only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails or a required setting is missing.
    pub fn load(&self) -> Result<Configuration, ConfigError> {
        self.local_layer()?.into_configuration()
    }

    /// Resolves the configuration, fetching settings missing locally from `store`.
    ///
    /// The store is queried once, and only when something is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails or a required setting is missing.
    pub async fn load_with_store<P>(
        &self,
        store: &P,
        names: &ParameterNames,
    ) -> Result<Configuration, ConfigError>
    where
        P: ParameterStore + ?Sized,
    {
        let local = self.local_layer()?;
        let wanted = local.missing_parameters(names);

        if wanted.is_empty() {
            debug!("All settings resolved locally, skipping parameter store");
            return local.into_configuration();
        }

        info!(parameters = ?wanted, "Retrieving settings from parameter store");
        let values = store.get_parameters(&wanted).await?;
        local
            .or(ConfigLayer::from_parameters(&values, names))
            .into_configuration()
    }
}
