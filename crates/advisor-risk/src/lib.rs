//! Risk levels for the advisory engine.
//!
//! Stop-loss and take-profit prices are offsets of the current price scaled
//! by ATR and the caller's risk tolerance. A higher tolerance widens the
//! profit target and pulls the stop towards the current price.

pub mod levels;

pub use levels::{OutOfRangePolicy, RiskCalculator, RiskLevels, RiskSettings};
