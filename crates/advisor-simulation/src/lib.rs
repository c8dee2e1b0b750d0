//! Monte Carlo price simulation.
//!
//! Paths are driven by i.i.d. Gaussian daily returns whose mean and sample
//! standard deviation come from the historical close-to-close returns. Fat
//! tails, volatility clustering and autocorrelation are not modelled.

pub mod monte_carlo;
pub mod percentile;

pub use monte_carlo::{simulate, MonteCarloConfig, MonteCarloSimulator, Outlook, SimulationResult};
pub use percentile::percentile;
