//! Moving average indicators.

use advisor_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Arithmetic mean of each trailing window, recomputed per window.
///
/// Slower than the sliding sum in [`Sma`] but exact for windows of zeros,
/// which RSI relies on to detect a zero-loss window.
pub(crate) fn window_means(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }
    let period_f64 = period as f64;
    data.windows(period)
        .map(|w| w.iter().sum::<f64>() / period_f64)
        .collect()
}
