//! Simulate command implementation.

use advisor_config::AppConfig;
use advisor_indicators::annualize;
use advisor_simulation::{MonteCarloSimulator, SimulationResult};
use anyhow::{Context, Result};

use super::{apply_data_args, load_series};
use crate::cli::{OutputFormat, SimulateArgs};

pub async fn run(args: SimulateArgs, mut config: AppConfig) -> Result<()> {
    apply_data_args(&args.data, &mut config)?;

    let mut settings = config.simulation;
    if let Some(days) = args.days {
        settings.horizon_days = days;
    }
    if let Some(count) = args.simulations {
        settings.simulation_count = count;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let simulator = MonteCarloSimulator::new(settings).context("Invalid simulation settings")?;

    let series = load_series(&args.symbol, &args.data, &config).await?;
    let symbol = series.symbol.clone();
    let result = tokio::task::spawn_blocking(move || simulator.run(&series))
        .await
        .context("Simulation task failed")?
        .with_context(|| format!("Simulation failed for {symbol}"))?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => println!("{}", summary(&symbol, &result)),
    }
    Ok(())
}

fn summary(symbol: &str, result: &SimulationResult) -> String {
    let mut s = String::new();

    s.push_str("═══════════════════════════════════════════════════════════\n");
    s.push_str(&format!("                 MONTE CARLO: {:<28}\n", symbol));
    s.push_str("═══════════════════════════════════════════════════════════\n\n");

    s.push_str(&format!("  Current Price:       {:.2}\n", result.current_price));
    s.push_str(&format!("  Horizon:             {} days\n", result.horizon_days));
    s.push_str(&format!("  Paths:               {}\n", result.simulation_count));
    s.push_str(&format!("  Seed:                {}\n", result.seed));
    s.push('\n');

    s.push_str("RETURNS\n");
    s.push_str("───────────────────────────────────────────────────────────\n");
    s.push_str(&format!("  Mean Daily Return:   {:.4}%\n", result.mean_return * 100.0));
    s.push_str(&format!(
        "  Daily Volatility:    {:.4}% (annualized {:.2}%)\n",
        result.std_dev_return * 100.0,
        annualize(result.std_dev_return) * 100.0
    ));
    s.push('\n');

    s.push_str("PRICE RANGE\n");
    s.push_str("───────────────────────────────────────────────────────────\n");
    s.push_str(&format!("  Worst Case (p5):     {:.2}\n", result.worst_case));
    s.push_str(&format!("  Expected:            {:.2}\n", result.expected_value));
    s.push_str(&format!("  Best Case (p95):     {:.2}\n", result.best_case));
    s.push_str(&format!("  Outlook:             {}\n", result.outlook()));
    s.push('\n');

    s.push_str("═══════════════════════════════════════════════════════════\n");

    s
}
