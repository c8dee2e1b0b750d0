//! External collaborator contracts: market data and sentiment.

use async_trait::async_trait;

use crate::error::DataError;
use crate::types::{Interval, Period, RawBar, SentimentSignal};

/// Trait for historical market data providers.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch historical bars.
    ///
    /// # Arguments
    /// * `symbol` - The (exchange-qualified) symbol to fetch
    /// * `period` - How far back to look
    /// * `interval` - The bar interval
    ///
    /// # Returns
    /// Raw bars ordered from oldest to newest. Columns may be incomplete;
    /// callers validate them with `PriceSeries::from_raw`.
    async fn fetch_bars(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<RawBar>, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// Trait for news/sentiment providers.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Fetch the current sentiment for a symbol.
    async fn fetch_sentiment(&self, symbol: &str) -> Result<SentimentSignal, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}
