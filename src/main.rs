//! Stock advisory CLI application.

mod cli;

use advisor_config::load_config_or_default;
use advisor_monitor::setup_logging;
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration from environment".to_string(),
    })?;

    // Setup logging
    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json = cli.json_logs || config.logging.is_json();
    let _guard = setup_logging(&level, json, config.logging.file.as_deref().map(Path::new));

    // Execute command
    match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, config).await,
        Commands::Simulate(args) => cli::commands::simulate::run(args, config).await,
        Commands::Forecast(args) => cli::commands::forecast::run(args, config).await,
        Commands::ValidateConfig(args) => {
            cli::commands::validate::run(args, cli.config.as_deref(), config)
        }
    }
}
