use crate::utils::error::{FetchError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FetchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FetchError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FetchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Rejects blank values. Secrets are masked in the resulting error.
pub fn validate_non_empty_secret(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FetchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "<blank>".to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rejects values that still carry an unresolved `${VAR}` placeholder.
pub fn validate_no_placeholder(field_name: &str, value: &str, secret: bool) -> Result<()> {
    if value.contains("${") {
        return Err(FetchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: if secret {
                "<redacted>".to_string()
            } else {
                value.to_string()
            },
            reason: "Unresolved environment variable placeholder".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FetchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
