//! Batch orchestration.

use std::sync::Arc;

use advisor_config::{AppConfig, BatchSettings};
use advisor_core::error::AdvisorError;
use advisor_core::traits::{MarketDataProvider, SentimentProvider};
use advisor_core::types::{PriceSeries, SentimentSignal};
use advisor_data::{fetch_series, ExchangeMap};
use advisor_signals::{select_fallback, DecisionReport};
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::advisor::Advisor;
use crate::report::{BatchReport, SymbolReport};

/// Symbols to analyse together.
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    pub symbols: Vec<String>,
    /// Exchange whose ticker suffix is appended to every symbol.
    pub exchange: Option<String>,
    /// `None` uses the configured default.
    pub risk_tolerance: Option<f64>,
}

impl BatchRequest {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            ..Default::default()
        }
    }

    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    pub fn with_risk_tolerance(mut self, tolerance: f64) -> Self {
        self.risk_tolerance = Some(tolerance);
        self
    }
}

/// Runs the advisor over many symbols with bounded concurrency.
pub struct BatchRunner {
    advisor: Arc<Advisor>,
    market: Arc<dyn MarketDataProvider>,
    sentiment: Arc<dyn SentimentProvider>,
    settings: BatchSettings,
    exchanges: ExchangeMap,
}

impl BatchRunner {
    pub fn new(
        advisor: Advisor,
        market: Arc<dyn MarketDataProvider>,
        sentiment: Arc<dyn SentimentProvider>,
        settings: BatchSettings,
    ) -> Result<Self, AdvisorError> {
        settings.validate()?;
        Ok(Self {
            advisor: Arc::new(advisor),
            market,
            sentiment,
            settings,
            exchanges: ExchangeMap::default(),
        })
    }

    pub fn from_config(
        config: &AppConfig,
        market: Arc<dyn MarketDataProvider>,
        sentiment: Arc<dyn SentimentProvider>,
    ) -> Result<Self, AdvisorError> {
        config.validate()?;
        let advisor = Advisor::from_config(config)?;
        Ok(Self::new(advisor, market, sentiment, config.batch.clone())?
            .with_exchanges(config.exchanges.clone()))
    }

    pub fn with_exchanges(mut self, exchanges: ExchangeMap) -> Self {
        self.exchanges = exchanges;
        self
    }

    pub fn advisor(&self) -> &Advisor {
        &self.advisor
    }

    /// Analyse every requested symbol.
    ///
    /// The response holds one entry per requested symbol, in request order.
    /// Symbols not yet launched when `cancel` fires become `cancelled`
    /// entries; symbols already in flight finish.
    pub async fn run(&self, request: &BatchRequest, cancel: &CancellationToken) -> BatchReport {
        let batch_id = Uuid::new_v4();
        let span = info_span!("batch", %batch_id);

        async move {
            let symbols: Vec<String> = request
                .symbols
                .iter()
                .map(|s| self.exchanges.apply(s, request.exchange.as_deref()))
                .collect();

            info!(
                symbols = symbols.len(),
                concurrency = self.settings.concurrency(),
                "Starting batch"
            );

            let results: Vec<Result<DecisionReport, AdvisorError>> = stream::iter(&symbols)
                .map(|symbol| self.analyze_symbol(symbol, request.risk_tolerance, cancel))
                .buffered(self.settings.concurrency())
                .collect()
                .await;

            let results = if symbols.len() > 1 {
                self.apply_fallback(results)
            } else {
                results
            };

            let reports = symbols
                .iter()
                .zip(&results)
                .map(|(symbol, result)| SymbolReport::from_result(symbol, result))
                .collect();
            let report = BatchReport::new(batch_id, reports);

            info!(
                succeeded = report.succeeded(),
                failed = report.failed(),
                "Batch complete"
            );
            report
        }
        .instrument(span)
        .await
    }

    async fn analyze_symbol(
        &self,
        symbol: &str,
        risk_tolerance: Option<f64>,
        cancel: &CancellationToken,
    ) -> Result<DecisionReport, AdvisorError> {
        if cancel.is_cancelled() {
            info!(symbol, "Batch cancelled, not launching");
            return Err(AdvisorError::Cancelled);
        }

        async {
            let (series, sentiment) =
                tokio::join!(self.fetch_series(symbol), self.fetch_sentiment(symbol));
            let series = series?;

            let advisor = Arc::clone(&self.advisor);
            let result = tokio::task::spawn_blocking(move || {
                advisor.analyze(&series, sentiment, risk_tolerance)
            })
            .await
            .map_err(|e| AdvisorError::Internal(format!("analysis task failed: {e}")))?;

            match &result {
                Ok(report) => info!(
                    decision = %report.final_decision,
                    score = report.combined_score,
                    "Symbol analysed"
                ),
                Err(e) => warn!(error = %e, kind = %e.kind(), "Symbol failed"),
            }
            result
        }
        .instrument(info_span!("symbol", symbol))
        .await
    }

    async fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, AdvisorError> {
        let timeout = self.settings.market_data_timeout();
        let fetch = fetch_series(
            self.market.as_ref(),
            symbol,
            self.settings.period,
            self.settings.interval,
        );

        match tokio::time::timeout(timeout, fetch).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!(provider = self.market.name(), "Market data timed out");
                Err(AdvisorError::ProviderTimeout {
                    provider: self.market.name().to_string(),
                    timeout_ms: self.settings.market_data_timeout_ms,
                })
            }
        }
    }

    /// Never fails: an unavailable provider yields a neutral signal.
    async fn fetch_sentiment(&self, symbol: &str) -> SentimentSignal {
        let timeout = self.settings.sentiment_timeout();
        match tokio::time::timeout(timeout, self.sentiment.fetch_sentiment(symbol)).await {
            Ok(Ok(signal)) => signal,
            Ok(Err(e)) => {
                warn!(provider = self.sentiment.name(), error = %e, "Sentiment unavailable, using neutral");
                SentimentSignal::neutral()
            }
            Err(_) => {
                warn!(
                    provider = self.sentiment.name(),
                    timeout_ms = self.settings.sentiment_timeout_ms,
                    "Sentiment timed out, using neutral"
                );
                SentimentSignal::neutral()
            }
        }
    }

    /// Promote the best all-Avoid report; failed symbols take no part.
    fn apply_fallback(
        &self,
        mut results: Vec<Result<DecisionReport, AdvisorError>>,
    ) -> Vec<Result<DecisionReport, AdvisorError>> {
        let min_score = self.advisor.aggregator_config().fallback_min_score;
        let selected = {
            let (indices, reports): (Vec<usize>, Vec<&DecisionReport>) = results
                .iter()
                .enumerate()
                .filter_map(|(i, r)| r.as_ref().ok().map(|report| (i, report)))
                .unzip();
            select_fallback(&reports, min_score).map(|pos| indices[pos])
        };

        if let Some(Ok(report)) = selected.and_then(|idx| results.get_mut(idx)) {
            info!(
                symbol = %report.symbol,
                score = report.combined_score,
                "Every symbol resolved to Avoid, promoting best score"
            );
            *report = report.promoted();
        }
        results
    }
}
