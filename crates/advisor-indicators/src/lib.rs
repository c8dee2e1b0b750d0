//! Technical indicators for the advisory engine.
//!
//! This crate provides the indicator pipeline consumed by the aggregator:
//! - Simple moving averages (SMA50 / SMA200)
//! - Momentum: RSI over a simple rolling mean of gains and losses
//! - Volatility: ATR over a simple rolling mean of true range, and the
//!   rolling standard deviation of percentage returns
//!
//! Every indicator is available compact (one value per bar after warm-up)
//! or aligned (one `Option` per input bar). [`IndicatorEngine`] assembles the
//! aligned arrays into an [`IndicatorSet`].

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use engine::{compute_indicators, IndicatorEngine, IndicatorKind, IndicatorSet, IndicatorWindows};
pub use momentum::Rsi;
pub use moving_average::Sma;
pub use volatility::{annualize, Atr, RollingVolatility};
