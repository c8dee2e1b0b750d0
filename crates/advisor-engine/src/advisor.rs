//! Per-symbol advisory pipeline.

use advisor_config::AppConfig;
use advisor_core::error::{AdvisorError, ErrorKind};
use advisor_core::types::{PriceSeries, SentimentSignal};
use advisor_forecast::{ForecastResult, Forecaster};
use advisor_indicators::IndicatorEngine;
use advisor_risk::RiskCalculator;
use advisor_signals::{AggregationInput, AggregatorConfig, DecisionReport, SignalAggregator};
use advisor_simulation::{MonteCarloSimulator, SimulationResult};
use tracing::{debug, warn};

/// Runs indicators, the optional simulator and forecaster, and the
/// aggregator over one series.
///
/// Holds configuration only, so one instance can serve any number of
/// symbols concurrently.
#[derive(Debug, Clone)]
pub struct Advisor {
    indicators: IndicatorEngine,
    simulator: Option<MonteCarloSimulator>,
    forecaster: Option<Forecaster>,
    aggregator: SignalAggregator,
}

impl Advisor {
    pub fn new(
        indicators: IndicatorEngine,
        simulator: Option<MonteCarloSimulator>,
        forecaster: Option<Forecaster>,
        aggregator: SignalAggregator,
    ) -> Self {
        Self {
            indicators,
            simulator,
            forecaster,
            aggregator,
        }
    }

    /// Build from application configuration, validating every section used.
    pub fn from_config(config: &AppConfig) -> Result<Self, AdvisorError> {
        let indicators = IndicatorEngine::new(config.indicators)?;
        let simulator = if config.batch.run_simulation {
            Some(MonteCarloSimulator::new(config.simulation)?)
        } else {
            None
        };
        let forecaster = if config.batch.run_forecast {
            Some(Forecaster::new(config.forecast)?)
        } else {
            None
        };
        let risk = RiskCalculator::new(config.risk.clone())?;
        let aggregator = SignalAggregator::new(config.aggregator.clone(), risk)?;
        Ok(Self::new(indicators, simulator, forecaster, aggregator))
    }

    pub fn aggregator_config(&self) -> &AggregatorConfig {
        self.aggregator.config()
    }

    /// Analyse one series.
    ///
    /// A simulator or forecaster that lacks data is skipped and the
    /// aggregator falls back to its placeholder. Missing RSI or ATR fails
    /// the symbol.
    pub fn analyze(
        &self,
        series: &PriceSeries,
        sentiment: SentimentSignal,
        risk_tolerance: Option<f64>,
    ) -> Result<DecisionReport, AdvisorError> {
        let indicators = self.indicators.compute(series);

        let simulation = match &self.simulator {
            Some(simulator) => optional(&series.symbol, "simulation", simulator.run(series))?,
            None => None,
        };
        let forecast = match &self.forecaster {
            Some(forecaster) => optional(&series.symbol, "forecast", forecaster.run(series))?,
            None => None,
        };

        let report = self.aggregator.aggregate(AggregationInput {
            series,
            indicators: &indicators,
            simulation: simulation.as_ref(),
            forecast: forecast.as_ref(),
            sentiment,
            risk_tolerance,
        })?;

        debug!(
            symbol = %report.symbol,
            simulated = simulation.is_some(),
            forecast = forecast.is_some(),
            decision = %report.final_decision,
            "Analysis complete"
        );

        Ok(report)
    }

    pub fn simulate(&self, series: &PriceSeries) -> Option<Result<SimulationResult, AdvisorError>> {
        self.simulator
            .as_ref()
            .map(|s| s.run(series).map_err(AdvisorError::from))
    }

    pub fn forecast(&self, series: &PriceSeries) -> Option<Result<ForecastResult, AdvisorError>> {
        self.forecaster
            .as_ref()
            .map(|f| f.run(series).map_err(AdvisorError::from))
    }
}

/// Data insufficiency drops the component; anything else fails the symbol.
fn optional<T, E>(symbol: &str, component: &str, result: Result<T, E>) -> Result<Option<T>, AdvisorError>
where
    E: Into<AdvisorError>,
{
    match result.map_err(Into::into) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == ErrorKind::DataInsufficiency => {
            warn!(symbol, component, error = %e, "Skipping component");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::types::{Bar, Interval, SentimentLabel};
    use advisor_signals::{ConflictFlag, FinalDecision};

    fn series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 86_400_000, c, c + 1.0, c - 1.0, c, 1_000.0))
            .collect();
        PriceSeries::new("TEST", Interval::Daily, bars).unwrap()
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.simulation.simulation_count = 200;
        config.simulation.horizon_days = 20;
        config.simulation.seed = Some(7);
        config.forecast.lookback = 10;
        config.forecast.horizon_days = 5;
        config
    }

    fn wave(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.05).collect()
    }

    #[test]
    fn test_full_pipeline() {
        let advisor = Advisor::from_config(&config()).unwrap();
        let report = advisor
            .analyze(&series(&wave(250)), SentimentSignal::neutral(), None)
            .unwrap();

        assert_eq!(report.symbol, "TEST");
        assert!(report.simulation.is_some());
        assert!(report.outlook.is_some());
        assert!(report.forecast.is_some());
        assert!(report.rsi >= 0.0 && report.rsi <= 100.0);
        assert!(report.stop_loss < report.take_profit);
    }

    #[test]
    fn test_short_series_skips_forecast() {
        let mut config = config();
        config.forecast.lookback = 60;
        let advisor = Advisor::from_config(&config).unwrap();

        // Enough for RSI and ATR, too short for a 60-bar lookback.
        let report = advisor
            .analyze(&series(&wave(30)), SentimentSignal::neutral(), None)
            .unwrap();
        assert!(report.forecast.is_none());
        assert!(report.simulation.is_some());
        assert!((report.predicted_price - report.current_price * 1.02).abs() < 1e-9);
    }

    #[test]
    fn test_too_short_for_rsi_fails() {
        let advisor = Advisor::from_config(&config()).unwrap();
        let err = advisor
            .analyze(&series(&wave(5)), SentimentSignal::neutral(), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataInsufficiency);
        assert!(err.to_string().contains("RSI"));
    }

    #[test]
    fn test_components_can_be_disabled() {
        let mut config = config();
        config.batch.run_simulation = false;
        config.batch.run_forecast = false;
        let advisor = Advisor::from_config(&config).unwrap();
        assert!(advisor.simulate(&series(&wave(50))).is_none());

        let report = advisor
            .analyze(&series(&wave(50)), SentimentSignal::neutral(), None)
            .unwrap();
        assert!(report.simulation.is_none());
        assert!(report.forecast.is_none());
    }

    #[test]
    fn test_overbought_positive_is_mixed() {
        let mut config = config();
        config.batch.run_forecast = false;
        let advisor = Advisor::from_config(&config).unwrap();
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let report = advisor
            .analyze(
                &series(&closes),
                SentimentSignal::new(SentimentLabel::Positive, 0.9),
                None,
            )
            .unwrap();
        assert_eq!(report.conflict_flag, ConflictFlag::Mixed);
        assert_eq!(report.final_decision, FinalDecision::ReviewFurther);
    }

    #[test]
    fn test_rejected_tolerance_fails_symbol() {
        let mut config = config();
        config.risk.policy = advisor_risk::OutOfRangePolicy::Reject;
        let advisor = Advisor::from_config(&config).unwrap();
        let err = advisor
            .analyze(&series(&wave(50)), SentimentSignal::neutral(), Some(5.0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
