//! Data sources for the advisory engine.
//!
//! Network providers are out of scope; these implementations read local
//! files or hold data in memory and back the CLI and tests.

mod csv_source;
mod exchange;
mod memory;
mod sentiment;

pub use csv_source::CsvMarketData;
pub use exchange::{parse_symbol_list, ExchangeMap};
pub use memory::InMemoryMarketData;
pub use sentiment::{NeutralSentiment, StaticSentiment};

use advisor_core::error::DataError;
use advisor_core::traits::MarketDataProvider;
use advisor_core::types::{Interval, Period, PriceSeries};

/// Fetch bars for a symbol and validate them into a series.
pub async fn fetch_series(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    period: Period,
    interval: Interval,
) -> Result<PriceSeries, DataError> {
    let raw = provider.fetch_bars(symbol, period, interval).await?;
    if raw.is_empty() {
        return Err(DataError::NoDataAvailable(symbol.to_string()));
    }
    PriceSeries::from_raw(symbol, interval, &raw)
}
