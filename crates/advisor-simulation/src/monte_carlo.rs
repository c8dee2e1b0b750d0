//! Monte Carlo simulator.

use advisor_core::error::SimulationError;
use advisor_core::types::{PriceSeries, TRADING_DAYS_PER_YEAR};
use rand::distributions::Distribution;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;
use statrs::statistics::Statistics;
use std::fmt;
use tracing::debug;

use crate::percentile::percentile_sorted;

/// Lower percentile reported as the worst case.
pub const WORST_CASE_PERCENTILE: f64 = 5.0;
/// Upper percentile reported as the best case.
pub const BEST_CASE_PERCENTILE: f64 = 95.0;

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Days per path, counting the starting day.
    pub horizon_days: usize,
    /// Number of independent paths.
    pub simulation_count: usize,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            horizon_days: TRADING_DAYS_PER_YEAR as usize,
            simulation_count: 1000,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.horizon_days == 0 {
            return Err(SimulationError::InvalidParameter(
                "horizon_days must be at least 1".into(),
            ));
        }
        if self.simulation_count == 0 {
            return Err(SimulationError::InvalidParameter(
                "simulation_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Long-horizon view derived from the worst case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outlook {
    Buy,
    Hold,
    Sell,
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outlook::Buy => write!(f, "Buy"),
            Outlook::Hold => write!(f, "Hold"),
            Outlook::Sell => write!(f, "Sell"),
        }
    }
}

/// Terminal-day distribution summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub current_price: f64,
    /// 5th percentile of terminal prices.
    pub worst_case: f64,
    /// 95th percentile of terminal prices.
    pub best_case: f64,
    /// Mean terminal price.
    pub expected_value: f64,
    pub simulation_count: usize,
    pub horizon_days: usize,
    /// Sample mean of historical daily returns.
    pub mean_return: f64,
    /// Sample standard deviation of historical daily returns.
    pub std_dev_return: f64,
    /// Base seed the paths were drawn from.
    pub seed: u64,
}

impl SimulationResult {
    /// Buy when the worst case keeps 90% of the current price, hold above 75%.
    pub fn outlook(&self) -> Outlook {
        if self.worst_case > 0.9 * self.current_price {
            Outlook::Buy
        } else if self.worst_case > 0.75 * self.current_price {
            Outlook::Hold
        } else {
            Outlook::Sell
        }
    }
}

/// Simulates price paths from historical return statistics.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloSimulator {
    config: MonteCarloConfig,
}

impl MonteCarloSimulator {
    pub fn new(config: MonteCarloConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Run the simulation for one series.
    ///
    /// Each path draws from its own ChaCha stream of the base seed, so seeded
    /// results are identical regardless of how paths are scheduled across
    /// threads.
    pub fn run(&self, series: &PriceSeries) -> Result<SimulationResult, SimulationError> {
        let returns = series.returns();
        if returns.is_empty() {
            return Err(SimulationError::InsufficientData {
                required: 1,
                available: 0,
            });
        }
        if returns.iter().any(|r| !r.is_finite()) {
            return Err(SimulationError::Distribution(
                "historical returns contain non-finite values".into(),
            ));
        }

        let current_price = series
            .last_close()
            .ok_or(SimulationError::InsufficientData {
                required: 1,
                available: 0,
            })?;

        let mean_return = returns.iter().mean();
        // A single return has no sample deviation; treat it as flat.
        let std_dev_return = if returns.len() < 2 {
            0.0
        } else {
            returns.iter().std_dev()
        };

        let MonteCarloConfig {
            horizon_days,
            simulation_count,
            seed,
        } = self.config;
        let seed = seed.unwrap_or_else(rand::random);
        let steps = horizon_days - 1;

        let terminal: Vec<f64> = if std_dev_return > 0.0 {
            let normal = Normal::new(mean_return, std_dev_return)
                .map_err(|e| SimulationError::Distribution(e.to_string()))?;
            (0..simulation_count)
                .into_par_iter()
                .map(|path| {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    rng.set_stream(path as u64);
                    let mut price = current_price;
                    for _ in 0..steps {
                        price *= 1.0 + normal.sample(&mut rng);
                    }
                    price
                })
                .collect()
        } else {
            let mut price = current_price;
            for _ in 0..steps {
                price *= 1.0 + mean_return;
            }
            vec![price; simulation_count]
        };

        let mut sorted = terminal;
        sorted.sort_by(|a, b| a.total_cmp(b));

        let worst_case = percentile_sorted(&sorted, WORST_CASE_PERCENTILE);
        let best_case = percentile_sorted(&sorted, BEST_CASE_PERCENTILE);
        let expected_value = sorted.iter().sum::<f64>() / simulation_count as f64;

        debug!(
            symbol = %series.symbol,
            mean_return,
            std_dev_return,
            worst_case,
            best_case,
            expected_value,
            simulation_count,
            horizon_days,
            "Monte Carlo simulation complete"
        );

        Ok(SimulationResult {
            current_price,
            worst_case,
            best_case,
            expected_value,
            simulation_count,
            horizon_days,
            mean_return,
            std_dev_return,
            seed,
        })
    }
}

/// Simulate `simulation_count` paths of `horizon_days` days.
pub fn simulate(
    series: &PriceSeries,
    horizon_days: usize,
    simulation_count: usize,
    seed: Option<u64>,
) -> Result<SimulationResult, SimulationError> {
    MonteCarloSimulator::new(MonteCarloConfig {
        horizon_days,
        simulation_count,
        seed,
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
        PriceSeries::new("SIM", Interval::Daily, bars).unwrap()
    }

    fn noisy(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let s = series(&noisy(120));
        let a = simulate(&s, 60, 500, Some(7)).unwrap();
        let b = simulate(&s, 60, 500, Some(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let s = series(&noisy(120));
        let a = simulate(&s, 60, 500, Some(1)).unwrap();
        let b = simulate(&s, 60, 500, Some(2)).unwrap();
        assert_ne!(a.expected_value, b.expected_value);
    }

    #[test]
    fn test_bands_are_ordered() {
        let s = series(&noisy(120));
        let result = simulate(&s, 252, 1000, Some(42)).unwrap();
        assert!(result.worst_case <= result.best_case);
        assert!(result.worst_case > 0.0);
        assert_eq!(result.simulation_count, 1000);
        assert_eq!(result.horizon_days, 252);
        assert!(result.std_dev_return > 0.0);
    }

    #[test]
    fn test_flat_series_is_degenerate() {
        let s = series(&[50.0; 30]);
        let result = simulate(&s, 252, 1000, None).unwrap();
        assert_eq!(result.std_dev_return, 0.0);
        assert_eq!(result.worst_case, 50.0);
        assert_eq!(result.best_case, 50.0);
        assert_eq!(result.expected_value, 50.0);
    }

    #[test]
    fn test_single_path_zero_deviation_compounds_mean() {
        // One return: deviation is treated as zero, mean is 10%.
        let s = series(&[100.0, 110.0]);
        let horizon = 5;
        let result = simulate(&s, horizon, 1, Some(3)).unwrap();

        let mut expected = 110.0;
        for _ in 0..horizon - 1 {
            expected *= 1.0 + result.mean_return;
        }
        assert_eq!(result.worst_case, expected);
        assert_eq!(result.best_case, expected);
        assert_eq!(result.expected_value, expected);
    }

    #[test]
    fn test_horizon_of_one_day_returns_current_price() {
        let s = series(&noisy(30));
        let result = simulate(&s, 1, 100, Some(9)).unwrap();
        let last = s.last_close().unwrap();
        assert_eq!(result.worst_case, last);
        assert_eq!(result.best_case, last);
    }

    #[test]
    fn test_single_bar_is_insufficient() {
        let s = series(&[100.0]);
        let err = simulate(&s, 10, 10, Some(1)).unwrap_err();
        assert!(matches!(err, SimulationError::InsufficientData { .. }));
    }

    #[test]
    fn test_invalid_parameters() {
        let s = series(&noisy(10));
        assert!(matches!(
            simulate(&s, 0, 10, None),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert!(matches!(
            simulate(&s, 10, 0, None),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_outlook() {
        let mut result = SimulationResult {
            current_price: 100.0,
            worst_case: 95.0,
            best_case: 120.0,
            expected_value: 105.0,
            simulation_count: 1,
            horizon_days: 1,
            mean_return: 0.0,
            std_dev_return: 0.0,
            seed: 0,
        };
        assert_eq!(result.outlook(), Outlook::Buy);
        result.worst_case = 80.0;
        assert_eq!(result.outlook(), Outlook::Hold);
        result.worst_case = 75.0;
        assert_eq!(result.outlook(), Outlook::Sell);
    }
}
