//! Forecast command implementation.

use advisor_config::AppConfig;
use advisor_forecast::{ChartPoint, ForecastSummary, Forecaster};
use anyhow::{Context, Result};
use serde::Serialize;

use super::{apply_data_args, load_series};
use crate::cli::{ForecastArgs, OutputFormat};

#[derive(Serialize)]
struct ForecastOutput {
    symbol: String,
    summary: ForecastSummary,
    confidence_score: f64,
    training_mse: f64,
    chart: Vec<ChartPoint>,
}

pub async fn run(args: ForecastArgs, mut config: AppConfig) -> Result<()> {
    apply_data_args(&args.data, &mut config)?;

    let mut settings = config.forecast;
    if let Some(lookback) = args.lookback {
        settings.lookback = lookback;
    }
    if let Some(horizon) = args.horizon {
        settings.horizon_days = horizon;
    }
    let forecaster = Forecaster::new(settings).context("Invalid forecast settings")?;

    let series = load_series(&args.symbol, &args.data, &config).await?;
    let symbol = series.symbol.clone();
    let result = tokio::task::spawn_blocking(move || forecaster.run(&series))
        .await
        .context("Forecast task failed")?
        .with_context(|| format!("Forecast failed for {symbol}"))?;

    let output = ForecastOutput {
        symbol,
        summary: result.summary(),
        confidence_score: result.confidence_score,
        training_mse: result.training_mse,
        chart: result.chart_points(),
    };

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => println!("{}", text(&output, args.chart)),
    }
    Ok(())
}

fn text(output: &ForecastOutput, chart: bool) -> String {
    let summary = &output.summary;
    let mut s = String::new();

    s.push_str("═══════════════════════════════════════════════════════════\n");
    s.push_str(&format!("                   FORECAST: {:<29}\n", output.symbol));
    s.push_str("═══════════════════════════════════════════════════════════\n\n");

    s.push_str(&format!("  Start Price:         {:.2}\n", summary.start_price));
    s.push_str(&format!("  End Price:           {:.2}\n", summary.end_price));
    s.push_str(&format!("  Change:              {:.2}%\n", summary.percentage_change));
    s.push_str(&format!("  Trend:               {}\n", summary.trend));
    s.push_str(&format!("  Recommendation:      {}\n", summary.recommendation));
    s.push_str(&format!("  Confidence:          {:.1}\n", output.confidence_score));
    s.push('\n');

    if chart {
        s.push_str("DAILY PATH (±1% band)\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        for point in &output.chart {
            s.push_str(&format!(
                "  Day {:>3}:  {:>10.2}   [{:.2} .. {:.2}]\n",
                point.day, point.price, point.lower, point.upper
            ));
        }
        s.push('\n');
    }

    s.push_str("═══════════════════════════════════════════════════════════\n");

    s
}
