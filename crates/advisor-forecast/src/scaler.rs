//! Min-max normalisation.

use serde::{Deserialize, Serialize};

/// Maps values into [0, 1] using the min and max seen at fit time.
///
/// A constant input has zero range; every value then scales to 0 and
/// inverts back to the constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: f64,
    range: f64,
}

impl MinMaxScaler {
    /// Fit to `values`. Returns `None` for an empty or non-finite input.
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            min,
            range: max - min,
        })
    }

    pub fn transform_one(&self, value: f64) -> f64 {
        if self.range == 0.0 {
            0.0
        } else {
            (value - self.min) / self.range
        }
    }

    pub fn inverse_one(&self, scaled: f64) -> f64 {
        scaled * self.range + self.min
    }

    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform_one(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_into_unit_range() {
        let scaler = MinMaxScaler::fit(&[10.0, 20.0, 15.0]).unwrap();
        assert_eq!(scaler.transform(&[10.0, 20.0, 15.0]), vec![0.0, 1.0, 0.5]);
        assert_eq!(scaler.inverse_one(0.5), 15.0);
    }

    #[test]
    fn test_zero_range_guard() {
        let scaler = MinMaxScaler::fit(&[7.0, 7.0]).unwrap();
        assert_eq!(scaler.transform_one(7.0), 0.0);
        assert_eq!(scaler.inverse_one(0.0), 7.0);
    }

    #[test]
    fn test_rejects_empty_and_nan() {
        assert!(MinMaxScaler::fit(&[]).is_none());
        assert!(MinMaxScaler::fit(&[1.0, f64::NAN]).is_none());
    }
}
