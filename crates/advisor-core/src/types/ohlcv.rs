//! OHLCV (Open, High, Low, Close, Volume) data types.

use serde::{Deserialize, Serialize};

use super::Interval;
use crate::error::DataError;

/// Compact OHLCV bar.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// A bar as delivered by a market data provider.
///
/// Providers give no guarantee of column completeness, so every price
/// column is optional until [`PriceSeries::from_raw`] validates it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawBar {
    pub timestamp: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl RawBar {
    /// A raw bar with every column present.
    pub fn complete(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn positive(value: Option<f64>) -> Option<f64> {
    finite(value).filter(|v| *v > 0.0)
}

/// Ordered, immutable bar sequence for one symbol over one lookup window.
///
/// Timestamps are strictly ascending and every close is finite and
/// positive, so bar-to-bar returns are always defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Symbol identifier
    pub symbol: String,
    /// Interval of the bars
    pub interval: Interval,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Create a series from already-clean bars.
    pub fn new(symbol: impl Into<String>, interval: Interval, bars: Vec<Bar>) -> Result<Self, DataError> {
        let symbol = symbol.into();
        if bars.is_empty() {
            return Err(DataError::NoDataAvailable(symbol));
        }
        for pair in bars.windows(2) {
            let (previous, next) = (pair[0].timestamp, pair[1].timestamp);
            if next == previous {
                return Err(DataError::DuplicateTimestamp(next));
            }
            if next < previous {
                return Err(DataError::OutOfOrder { previous, next });
            }
        }
        if let Some(bad) = bars.iter().find(|b| !(b.close.is_finite() && b.close > 0.0)) {
            return Err(DataError::NonPositiveClose {
                timestamp: bad.timestamp,
                close: bad.close,
            });
        }
        Ok(Self {
            symbol,
            interval,
            bars,
        })
    }

    /// Validate provider output into a series.
    ///
    /// Rows without a finite positive close, or without a finite volume,
    /// are dropped. Missing open, high
    /// or low values are filled from the close. A column that is absent from
    /// every remaining row is rejected outright.
    pub fn from_raw(symbol: impl Into<String>, interval: Interval, raw: &[RawBar]) -> Result<Self, DataError> {
        let symbol = symbol.into();
        let with_close: Vec<&RawBar> = raw.iter().filter(|r| positive(r.close).is_some()).collect();
        if with_close.is_empty() {
            return Err(DataError::NoDataAvailable(symbol));
        }

        for (column, present) in [
            ("high", with_close.iter().any(|r| finite(r.high).is_some())),
            ("low", with_close.iter().any(|r| finite(r.low).is_some())),
            ("volume", with_close.iter().any(|r| finite(r.volume).is_some())),
        ] {
            if !present {
                return Err(DataError::MissingColumn(column));
            }
        }

        let bars: Vec<Bar> = with_close
            .into_iter()
            .filter_map(|r| {
                let close = positive(r.close)?;
                let volume = finite(r.volume)?;
                Some(Bar::new(
                    r.timestamp,
                    finite(r.open).unwrap_or(close),
                    finite(r.high).unwrap_or(close),
                    finite(r.low).unwrap_or(close),
                    close,
                    volume,
                ))
            })
            .collect();

        Self::new(symbol, interval, bars)
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Close of the most recent bar.
    pub fn last_close(&self) -> Option<f64> {
        self.last().map(|b| b.close)
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Bar-to-bar percentage returns of the close; the first bar has none,
    /// so the result is one shorter than the series.
    pub fn returns(&self) -> Vec<f64> {
        pct_change(&self.closes())
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}

/// Percentage change between consecutive values (first entry dropped).
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}
