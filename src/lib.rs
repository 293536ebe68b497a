pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{load_settings, RequestSettings, SettingsOverrides, DEFAULT_ENDPOINT};
pub use self::core::{
    executor::{run, run_configured, RequestExecutor},
    report::Outcome,
};
pub use utils::error::{ErrorCategory, FetchError, Result};
