//! CSV market data provider.

use advisor_core::error::DataError;
use advisor_core::traits::MarketDataProvider;
use advisor_core::types::{Interval, Period, RawBar};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// CSV record format. Every price column is optional.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "Datetime", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", default)]
    open: Option<f64>,
    #[serde(alias = "High", default)]
    high: Option<f64>,
    #[serde(alias = "Low", default)]
    low: Option<f64>,
    #[serde(alias = "Close", default)]
    close: Option<f64>,
    #[serde(rename = "Adj Close", alias = "adj_close", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", default)]
    volume: Option<f64>,
}

/// Reads `<SYMBOL>_<interval>.csv` or `<SYMBOL>.csv` from a directory.
#[derive(Debug, Clone)]
pub struct CsvMarketData {
    root: PathBuf,
}

impl CsvMarketData {
    /// Create a provider over a data directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, DataError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(DataError::ConnectionError(format!(
                "data directory {} does not exist",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    fn locate(&self, symbol: &str, interval: Interval) -> Option<PathBuf> {
        [
            self.root.join(format!("{symbol}_{interval}.csv")),
            self.root.join(format!("{symbol}.csv")),
        ]
        .into_iter()
        .find(|p| p.is_file())
    }

    /// Parse CSV text into raw bars sorted by timestamp.
    pub fn parse(text: &str) -> Result<Vec<RawBar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            bars.push(RawBar {
                timestamp: parse_timestamp(&record.date)?,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close.or(record.adj_close),
                volume: record.volume,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        Ok(bars)
    }

    async fn load(path: &Path) -> Result<String, DataError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DataError::ConnectionError(format!("{}: {e}", path.display())))
    }
}

/// Keep bars within `period` of the newest bar.
fn trim_to_period(bars: Vec<RawBar>, period: Period) -> Vec<RawBar> {
    let (Some(days), Some(last)) = (period.calendar_days(), bars.last()) else {
        return bars;
    };
    let cutoff = last.timestamp - i64::from(days) * MILLIS_PER_DAY;
    bars.into_iter().filter(|b| b.timestamp > cutoff).collect()
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];
    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    // Unix timestamp; assume milliseconds if > 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        return Ok(if ts > 10_000_000_000 { ts } else { ts * 1000 });
    }

    Err(DataError::ParseError(format!("Could not parse date: {date_str}")))
}

#[async_trait]
impl MarketDataProvider for CsvMarketData {
    async fn fetch_bars(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<RawBar>, DataError> {
        let path = self
            .locate(symbol, interval)
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

        let text = Self::load(&path).await?;
        let bars = trim_to_period(Self::parse(&text)?, period);

        debug!(symbol, path = %path.display(), bars = bars.len(), %period, "Loaded CSV bars");
        Ok(bars)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
