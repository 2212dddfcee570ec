use std::process::ExitCode;

use clap::Parser;

use addon_cli::adapter::inbound::cli::command::Cli;
use addon_cli::adapter::inbound::cli::output::{self, OutputConfig};
use addon_cli::adapter::inbound::cli::{interrupt, paths, run};
use addon_cli::error::Result;
use addon_cli::infrastructure::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.color));
    interrupt::watch();

    match start(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_cancelled() => {
            output::warning("Cancelled by user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn start(cli: &Cli) -> Result<()> {
    let mut config = Config::discover(cli.config.as_deref(), paths::default_config())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format.as_str().to_string();
    }
    config.logging.init(cli.verbose);

    // Both the S3 SDK and sqlx use rustls; pin them to one provider.
    let _ = rustls::crypto::ring::default_provider().install_default();

    run::execute(cli, &config).await
}
