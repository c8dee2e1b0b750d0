//! CLI command implementations.

pub mod analyze;
pub mod forecast;
pub mod simulate;
pub mod validate;

use advisor_config::AppConfig;
use advisor_core::types::PriceSeries;
use advisor_data::{fetch_series, CsvMarketData};
use anyhow::{Context, Result};
use tracing::info;

use crate::cli::DataArgs;

/// Fold `--data`, `--period` and `--interval` into the configuration.
pub(crate) fn apply_data_args(args: &DataArgs, config: &mut AppConfig) -> Result<()> {
    if let Some(dir) = &args.data {
        config.data.dir = dir.clone();
    }
    if let Some(period) = &args.period {
        config.batch.period = period.parse().context("Invalid --period")?;
    }
    if let Some(interval) = &args.interval {
        config.batch.interval = interval.parse().context("Invalid --interval")?;
    }
    Ok(())
}

pub(crate) fn market_data(config: &AppConfig) -> Result<CsvMarketData> {
    let dir = &config.data.dir;
    if !dir.exists() {
        anyhow::bail!(
            "Data directory '{}' does not exist. Provide a directory of CSV files (e.g. --data ./data)",
            dir.display()
        );
    }
    CsvMarketData::new(dir).context("Failed to open data directory")
}

/// Load and validate the series for one exchange-qualified symbol.
pub(crate) async fn load_series(
    symbol: &str,
    args: &DataArgs,
    config: &AppConfig,
) -> Result<PriceSeries> {
    let market = market_data(config)?;
    let symbol = config.exchanges.apply(symbol, args.exchange.as_deref());
    let series = fetch_series(&market, &symbol, config.batch.period, config.batch.interval)
        .await
        .with_context(|| format!("Failed to load data for {symbol}"))?;
    info!(symbol = %symbol, bars = series.len(), "Loaded series");
    Ok(series)
}
