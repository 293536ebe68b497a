use super::SettingsOverrides;
use clap::Parser;

#[derive(Clone, Parser)]
#[command(name = "employee-stats")]
#[command(about = "Fetch employee statistics from the REST API and print the JSON response")]
pub struct CliConfig {
    /// Stats endpoint URL [default: http://localhost:8081/api/employee/stats]
    #[arg(long, env = "EMPLOYEE_STATS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Bearer token sent in the Authorization header
    #[arg(long, env = "EMPLOYEE_STATS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout; no timeout when omitted
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Exit with a non-zero status when the request fails
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            endpoint: self.endpoint.clone(),
            token: self.token.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }
}
