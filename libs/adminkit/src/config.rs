//! Environment configuration: the named REST APIs the SDKs talk to, plus
//! optional per-SDK sections.
//!
//! Sources are layered with `figment`, later ones winning:
//!
//! 1. built-in defaults (no APIs);
//! 2. an optional YAML file;
//! 3. environment variables prefixed with `ADMINKIT__`, where `__` separates
//!    nesting levels (`ADMINKIT__APIS__DEFAULT__URL=https://api.example.com`).
//!
//! ```yaml
//! apis:
//!   default:
//!     url: https://api.example.com
//!   Identity:
//!     url: https://identity.example.com
//! sdk:
//!   permission-management:
//!     cascade: direct
//! ```
//!
//! SDK sections are loaded leniently: a missing section yields `T::default()`,
//! a present but malformed one is an error.

use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// API used when a named API has no entry of its own.
pub const DEFAULT_API_NAME: &str = "default";

/// Prefix of environment variables overriding file configuration.
pub const ENV_PREFIX: &str = "ADMINKIT__";

/// Configuration error for environment and SDK config operations
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[source] Box<figment::Error>),
    #[error("API '{api_name}' is not configured and no 'default' API exists")]
    ApiNotConfigured { api_name: String },
    #[error("invalid URL '{url}' for API '{api_name}': {source}")]
    InvalidUrl {
        api_name: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid config for SDK '{sdk}': {source}")]
    InvalidSdkConfig {
        sdk: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One backend API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiEndpoint {
    /// Base URL every request path is appended to.
    pub url: String,
    /// Namespace the server-side proxies are generated under, informational.
    pub root_namespace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    pub apis: BTreeMap<String, ApiEndpoint>,
    /// Raw per-SDK sections, keyed by SDK name.
    pub sdk: BTreeMap<String, serde_json::Value>,
}

impl EnvironmentConfig {
    /// Layered figment for the given optional YAML file.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract the configuration from an already assembled figment.
    ///
    /// # Errors
    /// Returns `ConfigError::Load` if the merged sources do not match the schema.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        figment
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load defaults, the optional YAML file and environment overrides.
    ///
    /// # Errors
    /// Returns `ConfigError::Load` if any source is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::from_figment(&Self::figment(path))?;
        tracing::debug!(apis = config.apis.len(), "environment configuration loaded");
        Ok(config)
    }

    /// Resolve a named API, falling back to [`DEFAULT_API_NAME`].
    ///
    /// Environment variables arrive lower-cased, so names are matched
    /// case-insensitively when no exact entry exists.
    ///
    /// # Errors
    /// Returns `ConfigError::ApiNotConfigured` when neither the API nor the default exists.
    pub fn api(&self, api_name: &str) -> Result<&ApiEndpoint, ConfigError> {
        self.lookup(api_name)
            .or_else(|| self.lookup(DEFAULT_API_NAME))
            .ok_or_else(|| ConfigError::ApiNotConfigured {
                api_name: api_name.to_owned(),
            })
    }

    /// Parsed base URL of a named API.
    ///
    /// # Errors
    /// Returns `ConfigError::ApiNotConfigured` or `ConfigError::InvalidUrl`.
    pub fn base_url(&self, api_name: &str) -> Result<Url, ConfigError> {
        let endpoint = self.api(api_name)?;
        Url::parse(&endpoint.url).map_err(|source| ConfigError::InvalidUrl {
            api_name: api_name.to_owned(),
            url: endpoint.url.clone(),
            source,
        })
    }

    /// Lenient SDK configuration loader that falls back to defaults.
    ///
    /// - If the SDK has no section → returns `Ok(T::default())`
    /// - If the section is present but invalid → returns `Err(ConfigError::InvalidSdkConfig)`
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidSdkConfig` if the section cannot be deserialized.
    pub fn sdk_config_or_default<T: DeserializeOwned + Default>(
        &self,
        sdk: &str,
    ) -> Result<T, ConfigError> {
        let Some(section) = self.sdk.get(sdk) else {
            return Ok(T::default());
        };

        serde_json::from_value(section.clone()).map_err(|source| ConfigError::InvalidSdkConfig {
            sdk: sdk.to_owned(),
            source,
        })
    }

    fn lookup(&self, api_name: &str) -> Option<&ApiEndpoint> {
        self.apis.get(api_name).or_else(|| {
            self.apis
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(api_name))
                .map(|(_, endpoint)| endpoint)
        })
    }

    /// Convenience constructor with a single `default` API.
    #[must_use]
    pub fn with_default_api(url: impl Into<String>) -> Self {
        let mut apis = BTreeMap::new();
        apis.insert(
            DEFAULT_API_NAME.to_owned(),
            ApiEndpoint {
                url: url.into(),
                root_namespace: None,
            },
        );
        Self {
            apis,
            sdk: BTreeMap::new(),
        }
    }
}
