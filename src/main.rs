use anyhow::Context;
use clap::Parser;
use employee_stats::utils::logger;
use employee_stats::{run_configured, CliConfig};
use std::io::Write;
use std::path::Path;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting employee-stats");

    let outcome = run_configured(cli.overrides(), cli.config.as_deref().map(Path::new)).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    outcome
        .render(&mut out)
        .and_then(|_| out.flush())
        .context("failed to write report to stdout")?;

    if cli.strict && !outcome.is_success() {
        std::process::exit(outcome.exit_code());
    }

    Ok(())
}
