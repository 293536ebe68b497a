use std::error::Error as _;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// No response was obtained: refused connection, DNS failure, timeout.
    #[error("{}", describe_chain(.0))]
    Transport(#[source] reqwest::Error),

    /// The server answered with a 4xx or 5xx status.
    #[error("{message}")]
    Status {
        message: String,
        status: u16,
        body: String,
    },

    #[error("{source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        status: u16,
        body: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    Unexpected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Decode,
    Unexpected,
}

impl ErrorCategory {
    /// Prefix of the line printed for a failure of this category.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Request => "Error making request",
            ErrorCategory::Decode => "Error decoding JSON",
            ErrorCategory::Unexpected => "An unexpected error occurred",
        }
    }
}

impl FetchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FetchError::Transport(_) | FetchError::Status { .. } => ErrorCategory::Request,
            FetchError::Decode { .. } => ErrorCategory::Decode,
            _ => ErrorCategory::Unexpected,
        }
    }

    /// Status code and raw body, when a response was received before the failure.
    pub fn response(&self) -> Option<(u16, &str)> {
        match self {
            FetchError::Status { status, body, .. } | FetchError::Decode { status, body, .. } => {
                Some((*status, body.as_str()))
            }
            _ => None,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FetchError::ConfigError { .. }
                | FetchError::InvalidConfigValueError { .. }
        )
    }
}

// reqwest keeps the interesting part ("Connection refused") in the source chain.
fn describe_chain(err: &reqwest::Error) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}

pub type Result<T> = std::result::Result<T, FetchError>;
