//! One-step-ahead models.

use advisor_core::error::ForecastError;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::ridge_regression::{RidgeRegression, RidgeRegressionParameters};
use std::fmt;

use crate::dataset::WindowDataset;

/// Predicts the next scaled value from a window of scaled values.
pub trait SequenceModel: Send + Sync {
    /// Fit to the training pairs.
    fn fit(&mut self, dataset: &WindowDataset) -> Result<(), ForecastError>;

    /// Predict the value following `window`.
    fn predict_next(&self, window: &[f64]) -> Result<f64, ForecastError>;

    /// Get the name of the model.
    fn name(&self) -> &str;

    /// Mean squared error over the training pairs.
    fn training_mse(&self, dataset: &WindowDataset) -> Result<f64, ForecastError> {
        if dataset.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: 1,
                available: 0,
            });
        }
        let mut sum = 0.0;
        for (input, target) in dataset.inputs.iter().zip(&dataset.targets) {
            let err = self.predict_next(input)? - target;
            sum += err * err;
        }
        Ok(sum / dataset.len() as f64)
    }
}

type Ridge = RidgeRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Linear autoregression on the window with an L2 penalty.
///
/// No intercept is fitted; inputs are already min-max scaled. Half of the
/// penalty is applied as `lookback` pseudo-observations `sqrt(alpha / 2)·e_i`
/// with zero targets and half through the estimator, which gives the same
/// solution as a plain ridge fit with `alpha` while letting the estimator
/// accept fewer windows than features.
pub struct RidgeModel {
    alpha: f64,
    fitted: Option<Ridge>,
}

impl RidgeModel {
    pub fn new(alpha: f64) -> Result<Self, ForecastError> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "ridge alpha must be positive, got {alpha}"
            )));
        }
        Ok(Self {
            alpha,
            fitted: None,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

impl fmt::Debug for RidgeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RidgeModel")
            .field("alpha", &self.alpha)
            .field("fitted", &self.fitted.is_some())
            .finish()
    }
}

impl SequenceModel for RidgeModel {
    fn fit(&mut self, dataset: &WindowDataset) -> Result<(), ForecastError> {
        let Some(first) = dataset.inputs.first() else {
            return Err(ForecastError::InsufficientData {
                required: 1,
                available: 0,
            });
        };
        let features = first.len();
        let half = self.alpha / 2.0;
        let weight = half.sqrt();

        let mut rows: Vec<Vec<f64>> = dataset.inputs.clone();
        let mut targets = dataset.targets.clone();
        for i in 0..features {
            let mut row = vec![0.0; features];
            row[i] = weight;
            rows.push(row);
            targets.push(0.0);
        }

        let x = DenseMatrix::from_2d_array(&rows.iter().map(|v| v.as_slice()).collect::<Vec<_>>())
            .map_err(|e| ForecastError::Model(e.to_string()))?;
        let params = RidgeRegressionParameters::default()
            .with_alpha(half)
            .with_normalize(false);

        let model = Ridge::fit(&x, &targets, params).map_err(|e| ForecastError::Model(e.to_string()))?;
        self.fitted = Some(model);
        Ok(())
    }

    fn predict_next(&self, window: &[f64]) -> Result<f64, ForecastError> {
        let model = self
            .fitted
            .as_ref()
            .ok_or_else(|| ForecastError::Model("model has not been fitted".into()))?;

        let x = DenseMatrix::from_2d_array(&[window]).map_err(|e| ForecastError::Model(e.to_string()))?;
        let predicted = model
            .predict(&x)
            .map_err(|e| ForecastError::Model(e.to_string()))?;

        predicted
            .first()
            .copied()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ForecastError::Model("model produced no finite prediction".into()))
    }

    fn name(&self) -> &str {
        "Ridge"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 / (n - 1) as f64).collect()
    }

    #[test]
    fn test_rejects_non_positive_alpha() {
        assert!(RidgeModel::new(0.0).is_err());
        assert!(RidgeModel::new(-1.0).is_err());
        assert!(RidgeModel::new(f64::NAN).is_err());
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let model = RidgeModel::new(1e-3).unwrap();
        assert!(!model.is_fitted());
        assert!(model.predict_next(&[0.1, 0.2]).is_err());
    }

    #[test]
    fn test_fits_linear_ramp() {
        let values = ramp(50);
        let dataset = WindowDataset::build(&values, 5);
        let mut model = RidgeModel::new(1e-6).unwrap();
        model.fit(&dataset).unwrap();

        let next = model.predict_next(&values[45..]).unwrap();
        let step = 1.0 / 49.0;
        assert!((next - (1.0 + step)).abs() < 1e-3, "predicted {next}");
        assert!(model.training_mse(&dataset).unwrap() < 1e-6);
    }

    #[test]
    fn test_fits_single_window() {
        // Fewer windows than features still solves.
        let values = ramp(6);
        let dataset = WindowDataset::build(&values, 5);
        assert_eq!(dataset.len(), 1);
        let mut model = RidgeModel::new(1e-3).unwrap();
        model.fit(&dataset).unwrap();
        assert!(model.predict_next(&values[1..]).unwrap().is_finite());
    }
}
