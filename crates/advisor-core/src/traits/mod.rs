//! Core traits for the advisory engine.

mod indicator;
mod provider;

pub use indicator::{align_to, Indicator, OhlcvIndicator};
pub use provider::{MarketDataProvider, SentimentProvider};
