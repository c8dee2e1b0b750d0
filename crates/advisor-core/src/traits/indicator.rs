//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Front-pad compact indicator values so they line up with their input bars.
///
/// Bars in the warm-up period get `None`.
pub fn align_to(len: usize, values: Vec<f64>) -> Vec<Option<f64>> {
    let pad = len.saturating_sub(values.len());
    let mut aligned = Vec::with_capacity(len);
    aligned.resize(pad, None);
    aligned.extend(values.into_iter().take(len).map(Some));
    aligned
}

/// Trait for technical indicators computed from a single input column.
///
/// Implementations return compact output; the engine uses
/// [`Indicator::calculate_aligned`] for the per-bar view.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given data.
    ///
    /// The result is compact: it holds one value per bar after the warm-up
    /// period, so it is `data.len() - warmup()` long (or empty).
    fn calculate(&self, data: &[f64]) -> Vec<f64>;

    /// Number of leading bars that never get a value.
    fn warmup(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Get the minimum data points required for one value.
    fn period(&self) -> usize {
        self.warmup() + 1
    }

    /// Values aligned one-to-one with `data`, `None` during warm-up.
    fn calculate_aligned(&self, data: &[f64]) -> Vec<Option<f64>> {
        align_to(data.len(), self.calculate(data))
    }

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                indicator: self.name().to_string(),
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Indicator that uses the high, low and close columns (e.g. ATR).
pub trait OhlcvIndicator: Send + Sync {
    /// Calculate compact indicator values from HLC data.
    fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64>;

    /// Number of leading bars that never get a value.
    fn warmup(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Values aligned one-to-one with the input bars.
    fn calculate_aligned(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<f64>> {
        let len = high.len().min(low.len()).min(close.len());
        align_to(len, self.calculate(high, low, close))
    }
}
