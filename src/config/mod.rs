#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use self::toml_config::TomlConfig;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8081/api/employee/stats";

const AUTHORIZATION: &str = "authorization";

/// Resolved settings for one stats request.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestSettings {
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: BTreeMap<String, String>,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl RequestSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            timeout_seconds: None,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Overrides win over the file, the file wins over defaults.
    pub fn resolve(overrides: SettingsOverrides, file: Option<&TomlConfig>) -> Self {
        let source = file.map(|f| f.source.clone()).unwrap_or_default();

        Self {
            endpoint: overrides
                .endpoint
                .or(source.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            token: overrides.token.or(source.token),
            timeout_seconds: overrides.timeout_seconds.or(source.timeout_seconds),
            headers: source.headers,
        }
    }
}

/// Reads the optional TOML file, applies overrides and validates the result.
pub fn load_settings(
    overrides: SettingsOverrides,
    config_path: Option<&Path>,
) -> Result<RequestSettings> {
    let file = match config_path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Some(config)
        }
        None => None,
    };

    let settings = RequestSettings::resolve(overrides, file.as_ref());
    settings.validate()?;
    Ok(settings)
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl fmt::Debug for RequestSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSettings")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ConfigProvider for RequestSettings {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn extra_headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }
}

impl Validate for RequestSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;

        if let Some(token) = &self.token {
            validation::validate_non_empty_secret("token", token)?;

            if self
                .headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case(AUTHORIZATION))
            {
                return Err(crate::utils::error::FetchError::ConfigError {
                    message: "an Authorization header cannot be combined with a bearer token"
                        .to_string(),
                });
            }
        }

        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1, 3600)?;
        }

        Ok(())
    }
}
