//! In-memory market data.

use advisor_core::error::DataError;
use advisor_core::traits::MarketDataProvider;
use advisor_core::types::{Interval, Period, RawBar};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Serves preloaded bars, optionally after a delay.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketData {
    bars: HashMap<String, Vec<RawBar>>,
    delays: HashMap<String, Duration>,
    failures: HashMap<String, String>,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<RawBar>) -> Self {
        self.bars.insert(symbol.to_string(), bars);
        self
    }

    /// Delay every fetch of `symbol`.
    pub fn with_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    /// Make every fetch of `symbol` fail with a connection error.
    pub fn with_failure(mut self, symbol: &str, message: &str) -> Self {
        self.failures.insert(symbol.to_string(), message.to_string());
        self
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketData {
    async fn fetch_bars(
        &self,
        symbol: &str,
        _period: Period,
        _interval: Interval,
    ) -> Result<Vec<RawBar>, DataError> {
        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(message) = self.failures.get(symbol) {
            return Err(DataError::ConnectionError(message.clone()));
        }
        self.bars
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
