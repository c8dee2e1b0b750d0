//! Momentum indicators.

use advisor_core::traits::Indicator;

use crate::moving_average::window_means;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions. Gains and losses are
/// averaged with a simple rolling mean over `period` price changes, so the
/// first value lands on bar `period`.
///
/// A window with no losses reads 100; a window with neither gains nor
/// losses reads 50.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn from_averages(gain: f64, loss: f64) -> f64 {
        if loss == 0.0 {
            if gain == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            let rs = gain / loss;
            100.0 - (100.0 / (1.0 + rs))
        }
    }
}

impl Indicator for Rsi {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        // Calculate price changes
        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for pair in data.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let avg_gains = window_means(&gains, self.period);
        let avg_losses = window_means(&losses, self.period);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| Self::from_averages(gain, loss))
            .collect()
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_bounds() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..100)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
            .collect();
        let result = rsi.calculate(&data);

        assert_eq!(result.len(), data.len() - 14);
        for &value in &result {
            assert!((0.0..=100.0).contains(&value), "RSI {value} out of bounds");
        }
    }

    #[test]
    fn test_rsi_strictly_rising_is_100() {
        let rsi = Rsi::new(3);
        let result = rsi.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(result, vec![100.0, 100.0]);
    }

    #[test]
    fn test_rsi_flat_is_50() {
        let rsi = Rsi::new(3);
        let result = rsi.calculate(&[10.0; 6]);
        assert_eq!(result, vec![50.0, 50.0, 50.0]);
    }

    #[test]
    fn test_rsi_strictly_falling_is_0() {
        let rsi = Rsi::new(2);
        let result = rsi.calculate(&[5.0, 4.0, 3.0, 2.0]);
        assert_eq!(result, vec![0.0, 0.0]);
    }

    #[test]
    fn test_rsi_simple_mean_value() {
        // changes: +2, -1, +1 -> gains 2,0,1 losses 0,1,0
        let rsi = Rsi::new(3);
        let result = rsi.calculate(&[10.0, 12.0, 11.0, 12.0]);
        assert_eq!(result.len(), 1);
        // avg gain 1.0, avg loss 1/3, rs = 3 -> 75
        assert!((result[0] - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_warmup_alignment() {
        let rsi = Rsi::new(3);
        let aligned = rsi.calculate_aligned(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(aligned, vec![None, None, None, Some(100.0), Some(100.0)]);
    }

    #[test]
    fn test_rsi_needs_more_than_period_bars() {
        let rsi = Rsi::new(3);
        assert!(rsi.calculate(&[1.0, 2.0, 3.0]).is_empty());
        assert!(rsi.validate_data(&[1.0, 2.0, 3.0]).is_err());
        assert!(rsi.validate_data(&[1.0, 2.0, 3.0, 4.0]).is_ok());
    }
}
