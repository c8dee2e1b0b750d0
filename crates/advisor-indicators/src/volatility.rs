//! Volatility indicators.

use advisor_core::traits::{Indicator, OhlcvIndicator};
use advisor_core::types::{pct_change, TRADING_DAYS_PER_YEAR};

use crate::moving_average::window_means;

/// Scale a daily volatility figure to an annual one.
pub fn annualize(daily: f64) -> f64 {
    daily * (TRADING_DAYS_PER_YEAR as f64).sqrt()
}

/// Average True Range (ATR).
///
/// Measures market volatility by decomposing the entire range
/// of an asset price for that period. The first bar's true range is its
/// high minus low; later bars also consider the gap from the prior close.
/// True ranges are averaged with a simple rolling mean.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// True range for each bar.
    pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        let len = high.len().min(low.len()).min(close.len());
        let mut tr = Vec::with_capacity(len);

        for i in 0..len {
            let hl = high[i] - low[i];
            if i == 0 {
                tr.push(hl);
                continue;
            }
            let hc = (high[i] - close[i - 1]).abs();
            let lc = (low[i] - close[i - 1]).abs();
            tr.push(hl.max(hc).max(lc));
        }

        tr
    }
}

impl OhlcvIndicator for Atr {
    fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        let tr = Self::true_range(high, low, close);
        window_means(&tr, self.period)
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "ATR"
    }
}

/// Rolling sample standard deviation of close-to-close percentage returns.
///
/// Returns start at the second bar, so the first value lands on bar `period`.
#[derive(Debug, Clone)]
pub struct RollingVolatility {
    period: usize,
}

impl RollingVolatility {
    /// Create a new rolling volatility indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self { period }
    }
}

impl Indicator for RollingVolatility {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let returns = pct_change(data);
        let period_f64 = self.period as f64;

        returns
            .windows(self.period)
            .map(|window| {
                let mean = window.iter().sum::<f64>() / period_f64;
                let variance =
                    window.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (period_f64 - 1.0);
                variance.sqrt()
            })
            .collect()
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Volatility"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_range_first_bar_is_high_minus_low() {
        let tr = Atr::true_range(&[12.0, 15.0], &[10.0, 11.0], &[11.0, 14.0]);
        assert_eq!(tr, vec![2.0, 4.0]);
    }

    #[test]
    fn test_true_range_uses_gap_from_prior_close() {
        // Gap down: prior close 20, today's range 10-12
        let tr = Atr::true_range(&[21.0, 12.0], &[19.0, 10.0], &[20.0, 11.0]);
        assert_eq!(tr[1], 10.0);
    }

    #[test]
    fn test_atr_simple_mean() {
        let atr = Atr::new(2);
        let high = vec![12.0, 15.0, 14.0];
        let low = vec![10.0, 11.0, 13.0];
        let close = vec![11.0, 14.0, 13.5];
        // TR: 2, 4, 1
        let result = atr.calculate(&high, &low, &close);
        assert_eq!(result, vec![3.0, 2.5]);

        let aligned = atr.calculate_aligned(&high, &low, &close);
        assert_eq!(aligned, vec![None, Some(3.0), Some(2.5)]);
    }

    #[test]
    fn test_atr_non_negative() {
        let atr = Atr::new(14);
        let close: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).cos() * 5.0).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let result = atr.calculate(&high, &low, &close);
        assert_eq!(result.len(), 60 - 13);
        assert!(result.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_volatility_constant_growth_is_zero() {
        let vol = RollingVolatility::new(3);
        let data: Vec<f64> = (0..6).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let result = vol.calculate(&data);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_volatility_sample_std() {
        let vol = RollingVolatility::new(2);
        // returns: +10%, -10%
        let result = vol.calculate(&[100.0, 110.0, 99.0]);
        assert_eq!(result.len(), 1);
        // mean 0, sample variance (0.01 + 0.01) / 1
        assert!((result[0] - 0.02_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_volatility_warmup() {
        let vol = RollingVolatility::new(3);
        let aligned = vol.calculate_aligned(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(aligned.len(), 4);
        assert!(aligned[..3].iter().all(Option::is_none));
        assert!(aligned[3].is_some());
    }

    #[test]
    fn test_annualize() {
        assert!((annualize(0.01) - 0.01 * 252f64.sqrt()).abs() < 1e-12);
    }
}
