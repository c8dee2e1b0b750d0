//! Validate configuration command.

use advisor_config::{to_toml, AppConfig};
use anyhow::Result;
use std::path::Path;

use crate::cli::ValidateArgs;

pub fn run(args: ValidateArgs, config_path: Option<&Path>, config: AppConfig) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating defaults and environment overrides"),
    }

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!(
        "RSI thresholds: {} / {}",
        config.aggregator.rsi_oversold, config.aggregator.rsi_overbought
    );
    println!(
        "Simulation: {} paths over {} days",
        config.simulation.simulation_count, config.simulation.horizon_days
    );
    println!(
        "Forecast: lookback {}, horizon {} days",
        config.forecast.lookback, config.forecast.horizon_days
    );
    println!(
        "Risk tolerance: {} (range {} - {}, {:?} out of range)",
        config.risk.default_tolerance,
        config.risk.min_tolerance,
        config.risk.max_tolerance,
        config.risk.policy
    );
    println!("Concurrency: {}", config.batch.concurrency());

    if args.print {
        println!();
        println!("{}", to_toml(&config)?);
    }

    Ok(())
}
