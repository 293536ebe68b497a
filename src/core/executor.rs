use crate::config::{self, SettingsOverrides};
use crate::core::report::Outcome;
use crate::domain::model::StatsEnvelope;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FetchError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

/// Performs the single authenticated GET and classifies the result.
pub struct RequestExecutor<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> RequestExecutor<C> {
    pub fn new(config: C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Unexpected(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Extra headers first, then the bearer token.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (name, value) in self.config.extra_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                FetchError::InvalidConfigValueError {
                    field: "headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| FetchError::InvalidConfigValueError {
                    field: format!("headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        if let Some(token) = self.config.bearer_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                FetchError::InvalidConfigValueError {
                    field: "token".to_string(),
                    value: "<redacted>".to_string(),
                    reason: "token contains characters not allowed in an HTTP header".to_string(),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// One round trip. 4xx/5xx become `Status`, an undecodable body becomes `Decode`.
    pub async fn fetch(&self) -> Result<Value> {
        let headers = self.headers()?;
        if self.config.bearer_token().is_none() {
            tracing::warn!("No bearer token configured, sending request without Authorization header");
        }

        let endpoint = self.config.endpoint();
        tracing::debug!("Making API request to: {}", endpoint);
        let started = Instant::now();

        let response = self
            .client
            .get(endpoint)
            .headers(headers)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        tracing::debug!(
            "API response status: {} ({} ms)",
            status,
            started.elapsed().as_millis()
        );

        let status_error = response.error_for_status_ref().err().map(|e| e.to_string());

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read response body: {}", e);
                return Err(match status_error {
                    Some(message) => FetchError::Status {
                        message,
                        status: status.as_u16(),
                        body: String::new(),
                    },
                    None => FetchError::Transport(e),
                });
            }
        };

        if let Some(message) = status_error {
            return Err(FetchError::Status {
                message,
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(value),
            Err(source) => Err(FetchError::Decode {
                source,
                status: status.as_u16(),
                body,
            }),
        }
    }

    /// Never fails: every error ends up inside the returned outcome.
    pub async fn execute(&self) -> Outcome {
        match self.fetch().await {
            Ok(value) => {
                log_summary(&value);
                Outcome::Success(value)
            }
            Err(e) => {
                tracing::error!("❌ Request failed: {} (Category: {:?})", e, e.category());
                Outcome::Failure(e)
            }
        }
    }
}

/// Builds an executor for `config` and runs it once.
pub async fn run<C: ConfigProvider>(config: C) -> Outcome {
    match RequestExecutor::new(config) {
        Ok(executor) => executor.execute().await,
        Err(e) => {
            tracing::error!("❌ Could not prepare request: {}", e);
            Outcome::Failure(e)
        }
    }
}

/// Loads settings and runs once. Configuration failures become an outcome
/// like any other failure.
pub async fn run_configured(overrides: SettingsOverrides, config_path: Option<&Path>) -> Outcome {
    match config::load_settings(overrides, config_path) {
        Ok(settings) => {
            tracing::debug!("Request settings: {:?}", settings);
            run(settings).await
        }
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            Outcome::Failure(e)
        }
    }
}

fn log_summary(value: &Value) {
    let Some(envelope) = StatsEnvelope::from_value(value) else {
        tracing::debug!("Response is not a stats envelope, skipping summary");
        return;
    };

    if !envelope.is_ok() {
        tracing::warn!(
            "Stats API returned business code {}: {}",
            envelope.code,
            envelope.message.as_deref().unwrap_or("")
        );
        return;
    }

    if let Some(stats) = envelope.data {
        tracing::info!(
            "📊 Employees: {}, departments: {}, active: {}",
            stats.total.unwrap_or_default(),
            stats.dept_count.unwrap_or_default(),
            stats.active_count.unwrap_or_default()
        );
    }
}
