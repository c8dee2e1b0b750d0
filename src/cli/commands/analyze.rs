//! Analyze command implementation.

use advisor_config::AppConfig;
use advisor_core::traits::SentimentProvider;
use advisor_data::{parse_symbol_list, NeutralSentiment, StaticSentiment};
use advisor_engine::{BatchRequest, BatchRunner};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{apply_data_args, market_data};
use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, mut config: AppConfig) -> Result<()> {
    apply_data_args(&args.data, &mut config)?;
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if args.no_simulation {
        config.batch.run_simulation = false;
    }
    if args.no_forecast {
        config.batch.run_forecast = false;
    }
    if let Some(concurrency) = args.concurrency {
        config.batch.max_concurrency = Some(concurrency);
    }

    let sentiment: Arc<dyn SentimentProvider> =
        match args.sentiment.as_ref().or(config.data.sentiment_file.as_ref()) {
            Some(path) => Arc::new(
                StaticSentiment::from_json_file(path)
                    .with_context(|| format!("Failed to load sentiment from {}", path.display()))?,
            ),
            None => Arc::new(NeutralSentiment),
        };
    let market = Arc::new(market_data(&config)?);
    let runner =
        BatchRunner::from_config(&config, market, sentiment).context("Invalid configuration")?;

    let symbols: Vec<String> = args
        .symbols
        .iter()
        .flat_map(|s| parse_symbol_list(s))
        .collect();
    if symbols.is_empty() {
        anyhow::bail!("No symbols given (e.g. --symbols AAPL,MSFT)");
    }

    let mut request = BatchRequest::new(symbols);
    if let Some(exchange) = &args.data.exchange {
        request = request.with_exchange(exchange.clone());
    }
    if let Some(tolerance) = args.risk_tolerance {
        request = request.with_risk_tolerance(tolerance);
    }

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, finishing symbols already in flight");
                cancel.cancel();
            }
        })
    };

    info!("Analysing {} symbols", request.symbols.len());
    let report = runner.run(&request, &cancel).await;
    interrupt.abort();

    // Output results
    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = report.to_json()?;
        std::fs::write(save_path, json)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}
