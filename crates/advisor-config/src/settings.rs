//! Configuration structures.

use advisor_core::error::AdvisorError;
use advisor_core::types::{Interval, Period};
use advisor_data::ExchangeMap;
use advisor_forecast::ForecastConfig;
use advisor_indicators::IndicatorWindows;
use advisor_risk::RiskSettings;
use advisor_signals::AggregatorConfig;
use advisor_simulation::MonteCarloConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub indicators: IndicatorWindows,
    #[serde(default)]
    pub simulation: MonteCarloConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub risk: RiskSettings,
    #[serde(default)]
    pub batch: BatchSettings,
    #[serde(default)]
    pub exchanges: ExchangeMap,
}

impl AppConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), AdvisorError> {
        self.indicators.validate()?;
        self.simulation.validate()?;
        self.forecast.validate()?;
        self.aggregator.validate()?;
        self.risk.validate()?;
        self.batch.validate()?;
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "advisor".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Local data sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory of per-symbol CSV files.
    pub dir: PathBuf,
    /// JSON file of per-symbol headline polarity scores.
    pub sentiment_file: Option<PathBuf>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            sentiment_file: None,
        }
    }
}

/// Batch orchestration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Symbols analysed at once; defaults to available parallelism.
    pub max_concurrency: Option<usize>,
    pub market_data_timeout_ms: u64,
    pub sentiment_timeout_ms: u64,
    pub period: Period,
    pub interval: Interval,
    pub run_simulation: bool,
    pub run_forecast: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_concurrency: None,
            market_data_timeout_ms: 10_000,
            sentiment_timeout_ms: 3_000,
            period: Period::Years(1),
            interval: Interval::Daily,
            run_simulation: true,
            run_forecast: true,
        }
    }
}

impl BatchSettings {
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.max_concurrency == Some(0) {
            return Err(AdvisorError::Config("max_concurrency must be at least 1".into()));
        }
        if self.market_data_timeout_ms == 0 || self.sentiment_timeout_ms == 0 {
            return Err(AdvisorError::Config("provider timeouts must be non-zero".into()));
        }
        Ok(())
    }

    /// Effective concurrency limit.
    pub fn concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }

    pub fn market_data_timeout(&self) -> Duration {
        Duration::from_millis(self.market_data_timeout_ms)
    }

    pub fn sentiment_timeout(&self) -> Duration {
        Duration::from_millis(self.sentiment_timeout_ms)
    }
}
