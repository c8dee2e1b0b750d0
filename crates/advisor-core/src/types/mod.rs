//! Core data types for the advisory engine.

mod interval;
mod ohlcv;
mod sentiment;

pub use interval::{Interval, Period, TRADING_DAYS_PER_YEAR};
pub use ohlcv::{pct_change, Bar, PriceSeries, RawBar};
pub use sentiment::{SentimentLabel, SentimentSignal, NEGATIVE_POLARITY, POSITIVE_POLARITY};
