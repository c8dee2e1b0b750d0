//! Recursive forecaster.

use advisor_core::error::ForecastError;
use advisor_core::types::PriceSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::dataset::WindowDataset;
use crate::model::{RidgeModel, SequenceModel};
use crate::scaler::MinMaxScaler;

/// Forecaster parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Closes per input window.
    pub lookback: usize,
    /// Days to predict.
    pub horizon_days: usize,
    /// Half-width of the band as a fraction of each prediction.
    pub band_pct: f64,
    /// Percentage change beyond which the forecast counts as trending.
    pub trend_threshold_pct: f64,
    /// L2 penalty of the ridge model.
    pub ridge_alpha: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            lookback: 60,
            horizon_days: 30,
            band_pct: 0.01,
            trend_threshold_pct: 5.0,
            ridge_alpha: 1e-3,
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.lookback == 0 {
            return Err(ForecastError::InvalidParameter("lookback must be at least 1".into()));
        }
        if self.horizon_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon_days must be at least 1".into(),
            ));
        }
        if !(self.band_pct.is_finite() && self.band_pct >= 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "band_pct must be non-negative, got {}",
                self.band_pct
            )));
        }
        if !(self.trend_threshold_pct.is_finite() && self.trend_threshold_pct >= 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "trend_threshold_pct must be non-negative, got {}",
                self.trend_threshold_pct
            )));
        }
        Ok(())
    }

    /// Fewest bars that yield one training pair.
    ///
    /// A series of exactly `lookback` bars has a window but no target to
    /// learn from, so it is reported as insufficient rather than forecast
    /// from an untrained model.
    pub fn min_bars(&self) -> usize {
        self.lookback + 1
    }
}

/// Direction of the forecast path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
}

impl Trend {
    /// Classify a percentage change against a symmetric threshold.
    pub fn classify(percentage_change: f64, threshold_pct: f64) -> Self {
        if percentage_change > threshold_pct {
            Trend::Uptrend
        } else if percentage_change < -threshold_pct {
            Trend::Downtrend
        } else {
            Trend::Sideways
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Trend::Uptrend => "Buy",
            Trend::Downtrend => "Sell",
            Trend::Sideways => "Hold",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Uptrend => write!(f, "Uptrend"),
            Trend::Downtrend => write!(f, "Downtrend"),
            Trend::Sideways => write!(f, "Sideways"),
        }
    }
}

/// One day of the forecast for charting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub day: usize,
    pub price: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Headline figures of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub start_price: f64,
    pub end_price: f64,
    pub percentage_change: f64,
    pub trend: Trend,
    pub recommendation: String,
}

/// Multi-day forecast with a fixed-width band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predicted_prices: Vec<f64>,
    pub upper_band: Vec<f64>,
    pub lower_band: Vec<f64>,
    pub trend: Trend,
    /// Change from the first to the last predicted price, in percent.
    pub percentage_change: f64,
    /// 0..=100, higher for a lower training-set error.
    pub confidence_score: f64,
    /// Mean squared error on the scaled training pairs.
    pub training_mse: f64,
}

impl ForecastResult {
    /// First predicted price.
    pub fn next_price(&self) -> Option<f64> {
        self.predicted_prices.first().copied()
    }

    pub fn summary(&self) -> ForecastSummary {
        ForecastSummary {
            start_price: self.predicted_prices.first().copied().unwrap_or_default(),
            end_price: self.predicted_prices.last().copied().unwrap_or_default(),
            percentage_change: self.percentage_change,
            trend: self.trend,
            recommendation: self.trend.recommendation().to_string(),
        }
    }

    /// Per-day points, numbered from 1.
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.predicted_prices
            .iter()
            .zip(&self.upper_band)
            .zip(&self.lower_band)
            .enumerate()
            .map(|(i, ((&price, &upper), &lower))| ChartPoint {
                day: i + 1,
                price,
                upper,
                lower,
            })
            .collect()
    }
}

/// Input window rolled forward by the model's own predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    buffer: Vec<f64>,
}

impl WindowState {
    pub fn new(initial: Vec<f64>) -> Self {
        Self { buffer: initial }
    }

    pub fn window(&self) -> &[f64] {
        &self.buffer
    }

    /// Drop the oldest value and append `value`.
    pub fn push(&mut self, value: f64) {
        if self.buffer.is_empty() {
            return;
        }
        self.buffer.copy_within(1.., 0);
        if let Some(last) = self.buffer.last_mut() {
            *last = value;
        }
    }

    /// Predict the next value and feed it back into the window.
    pub fn step<M: SequenceModel + ?Sized>(&mut self, model: &M) -> Result<f64, ForecastError> {
        let next = model.predict_next(&self.buffer)?;
        self.push(next);
        Ok(next)
    }
}

/// Trains a model per request and produces a [`ForecastResult`].
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Result<Self, ForecastError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast with the default ridge model.
    pub fn run(&self, series: &PriceSeries) -> Result<ForecastResult, ForecastError> {
        let mut model = RidgeModel::new(self.config.ridge_alpha)?;
        self.run_with(series, &mut model)
    }

    /// Forecast with a caller-supplied model, which is fitted here.
    pub fn run_with<M: SequenceModel + ?Sized>(
        &self,
        series: &PriceSeries,
        model: &mut M,
    ) -> Result<ForecastResult, ForecastError> {
        let ForecastConfig {
            lookback,
            horizon_days,
            band_pct,
            trend_threshold_pct,
            ..
        } = self.config;

        let closes = series.closes();
        if closes.len() < self.config.min_bars() {
            return Err(ForecastError::InsufficientData {
                required: self.config.min_bars(),
                available: closes.len(),
            });
        }

        let scaler = MinMaxScaler::fit(&closes)
            .ok_or_else(|| ForecastError::Model("closes contain non-finite values".into()))?;
        let scaled = scaler.transform(&closes);

        let dataset = WindowDataset::build(&scaled, lookback);
        model.fit(&dataset)?;
        let training_mse = model.training_mse(&dataset)?;

        let mut state = WindowState::new(scaled[scaled.len() - lookback..].to_vec());
        let mut predicted_prices = Vec::with_capacity(horizon_days);
        for _ in 0..horizon_days {
            let next = state.step(model)?;
            predicted_prices.push(scaler.inverse_one(next));
        }

        let upper_band = predicted_prices.iter().map(|p| p * (1.0 + band_pct)).collect();
        let lower_band = predicted_prices.iter().map(|p| p * (1.0 - band_pct)).collect();

        let first = predicted_prices[0];
        let last = predicted_prices[predicted_prices.len() - 1];
        let percentage_change = if first == 0.0 {
            0.0
        } else {
            (last - first) / first * 100.0
        };
        let trend = Trend::classify(percentage_change, trend_threshold_pct);
        let confidence_score = (100.0 - training_mse * 100.0).clamp(0.0, 100.0);

        debug!(
            symbol = %series.symbol,
            model = model.name(),
            samples = dataset.len(),
            training_mse,
            percentage_change,
            %trend,
            "Forecast complete"
        );

        Ok(ForecastResult {
            predicted_prices,
            upper_band,
            lower_band,
            trend,
            percentage_change,
            confidence_score,
            training_mse,
        })
    }
}

/// Forecast `horizon_days` closes from windows of `lookback` closes.
pub fn forecast(
    series: &PriceSeries,
    lookback: usize,
    horizon_days: usize,
) -> Result<ForecastResult, ForecastError> {
    Forecaster::new(ForecastConfig {
        lookback,
        horizon_days,
        ..Default::default()
    })?
    .run(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::types::{Bar, Interval};

    fn series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 86_400, c, c, c, c, 1_000.0))
            .collect();
        PriceSeries::new("FC", Interval::Daily, bars).unwrap()
    }

    /// Predicts the last value of the window plus a fixed step.
    struct DriftModel {
        step: f64,
    }

    impl SequenceModel for DriftModel {
        fn fit(&mut self, _dataset: &WindowDataset) -> Result<(), ForecastError> {
            Ok(())
        }

        fn predict_next(&self, window: &[f64]) -> Result<f64, ForecastError> {
            Ok(window[window.len() - 1] + self.step)
        }

        fn name(&self) -> &str {
            "Drift"
        }
    }

    #[test]
    fn test_window_state_shifts_and_appends() {
        let mut state = WindowState::new(vec![1.0, 2.0, 3.0]);
        let model = DriftModel { step: 1.0 };
        assert_eq!(state.step(&model).unwrap(), 4.0);
        assert_eq!(state.window(), &[2.0, 3.0, 4.0]);
        assert_eq!(state.step(&model).unwrap(), 5.0);
        assert_eq!(state.window(), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_output_lengths_match_horizon() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let result = forecast(&series(&closes), 60, 30).unwrap();
        assert_eq!(result.predicted_prices.len(), 30);
        assert_eq!(result.upper_band.len(), 30);
        assert_eq!(result.lower_band.len(), 30);
        assert!((0.0..=100.0).contains(&result.confidence_score));
    }

    #[test]
    fn test_bands_are_one_percent() {
        let closes: Vec<f64> = (0..40).map(|i| 50.0 + i as f64).collect();
        let result = forecast(&series(&closes), 10, 5).unwrap();
        for ((p, u), l) in result
            .predicted_prices
            .iter()
            .zip(&result.upper_band)
            .zip(&result.lower_band)
        {
            assert!((u - p * 1.01).abs() < 1e-9);
            assert!((l - p * 0.99).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rising_series_is_not_downtrend() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + i as f64).collect();
        let result = forecast(&series(&closes), 60, 30).unwrap();
        assert_ne!(result.trend, Trend::Downtrend);
        assert!(result.predicted_prices[0] > 200.0);
    }

    #[test]
    fn test_minimum_bars_is_lookback_plus_one() {
        let closes: Vec<f64> = (0..61).map(|i| 100.0 + i as f64 * 0.5).collect();
        let result = forecast(&series(&closes), 60, 30).unwrap();
        assert_eq!(result.predicted_prices.len(), 30);

        let err = forecast(&series(&closes[..60]), 60, 30).unwrap_err();
        match err {
            ForecastError::InsufficientData {
                required,
                available,
            } => {
                assert_eq!(required, 61);
                assert_eq!(available, 60);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_custom_model_trend() {
        let closes: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
        let forecaster = Forecaster::new(ForecastConfig {
            lookback: 5,
            horizon_days: 10,
            ..Default::default()
        })
        .unwrap();
        // Scaled step of 0.1 over a range of 19 is 1.9 per day.
        let mut model = DriftModel { step: 0.1 };
        let result = forecaster.run_with(&series(&closes), &mut model).unwrap();
        assert_eq!(result.trend, Trend::Uptrend);
        assert!((result.predicted_prices[0] - 30.9).abs() < 1e-9);

        let summary = result.summary();
        assert_eq!(summary.recommendation, "Buy");
        assert_eq!(summary.start_price, result.predicted_prices[0]);

        let points = result.chart_points();
        assert_eq!(points.len(), 10);
        assert_eq!(points[0].day, 1);
        assert_eq!(points[9].day, 10);
    }

    #[test]
    fn test_flat_series_is_sideways() {
        let closes = vec![42.0; 30];
        let mut model = DriftModel { step: 0.0 };
        let forecaster = Forecaster::new(ForecastConfig {
            lookback: 10,
            horizon_days: 5,
            ..Default::default()
        })
        .unwrap();
        let result = forecaster.run_with(&series(&closes), &mut model).unwrap();
        assert_eq!(result.trend, Trend::Sideways);
        assert!(result.predicted_prices.iter().all(|p| *p == 42.0));
        assert_eq!(result.confidence_score, 100.0);
    }

    #[test]
    fn test_trend_classification() {
        assert_eq!(Trend::classify(5.1, 5.0), Trend::Uptrend);
        assert_eq!(Trend::classify(5.0, 5.0), Trend::Sideways);
        assert_eq!(Trend::classify(-5.1, 5.0), Trend::Downtrend);
        assert_eq!(Trend::Downtrend.recommendation(), "Sell");
    }

    #[test]
    fn test_invalid_config() {
        assert!(Forecaster::new(ForecastConfig {
            lookback: 0,
            ..Default::default()
        })
        .is_err());
        assert!(Forecaster::new(ForecastConfig {
            horizon_days: 0,
            ..Default::default()
        })
        .is_err());
    }
}
