//! Error types for the advisory engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Top-level advisory error.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Risk error: {0}")]
    Risk(#[from] RiskError),

    #[error("{provider} provider timed out after {timeout_ms} ms")]
    ProviderTimeout { provider: String, timeout_ms: u64 },

    #[error("Cancelled before analysis started")]
    Cancelled,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdvisorError {
    /// Classify the error for the caller-facing report.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdvisorError::Data(e) => e.kind(),
            AdvisorError::Simulation(SimulationError::InsufficientData { .. })
            | AdvisorError::Forecast(ForecastError::InsufficientData { .. })
            | AdvisorError::Indicator(IndicatorError::InsufficientData { .. }) => {
                ErrorKind::DataInsufficiency
            }
            AdvisorError::ProviderTimeout { .. } => ErrorKind::ProviderTimeout,
            AdvisorError::Cancelled => ErrorKind::Cancelled,
            AdvisorError::Config(_)
            | AdvisorError::Validation(_)
            | AdvisorError::Risk(_)
            | AdvisorError::Simulation(_)
            | AdvisorError::Forecast(_)
            | AdvisorError::Indicator(_) => ErrorKind::InvalidInput,
            AdvisorError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Caller-facing classification of a per-symbol failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The provider returned nothing for the symbol.
    DataUnavailable,
    /// The series is shorter than a component's minimum window.
    DataInsufficiency,
    /// The series is present but malformed (missing column, bad ordering).
    InvalidData,
    /// A collaborator call exceeded its timeout.
    ProviderTimeout,
    /// The request itself was invalid (e.g. risk tolerance out of range).
    InvalidInput,
    /// The batch was cancelled before this symbol was launched.
    Cancelled,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::DataUnavailable => "data_unavailable",
            ErrorKind::DataInsufficiency => "data_insufficiency",
            ErrorKind::InvalidData => "invalid_data",
            ErrorKind::ProviderTimeout => "provider_timeout",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Internal => "internal",
        };
        write!(f, "{}", s)
    }
}

/// Market data errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for {0}")]
    NoDataAvailable(String),

    #[error("Required column '{0}' is missing from every bar")]
    MissingColumn(&'static str),

    #[error("Duplicate timestamp {0}")]
    DuplicateTimestamp(i64),

    #[error("Bars out of order: {next} follows {previous}")]
    OutOfOrder { previous: i64, next: i64 },

    #[error("Close {close} at {timestamp} is not a positive price")]
    NonPositiveClose { timestamp: i64, close: f64 },

    #[error("Insufficient data for {component}: need {required} bars, have {available}")]
    InsufficientData {
        component: String,
        required: usize,
        available: usize,
    },

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Data source error: {0}")]
    Internal(String),
}

impl DataError {
    /// Build an insufficiency error naming the component that lacked data.
    pub fn insufficient(component: impl Into<String>, required: usize, available: usize) -> Self {
        DataError::InsufficientData {
            component: component.into(),
            required,
            available,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::SymbolNotFound(_)
            | DataError::NoDataAvailable(_)
            | DataError::ConnectionError(_) => ErrorKind::DataUnavailable,
            DataError::InsufficientData { .. } => ErrorKind::DataInsufficiency,
            DataError::MissingColumn(_)
            | DataError::DuplicateTimestamp(_)
            | DataError::OutOfOrder { .. }
            | DataError::NonPositiveClose { .. }
            | DataError::ParseError(_) => ErrorKind::InvalidData,
            DataError::InvalidInterval(_) | DataError::InvalidPeriod(_) => ErrorKind::InvalidInput,
            DataError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data for {indicator}: need {required} points, have {available}")]
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Monte Carlo simulation errors.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Insufficient data for simulation: need {required} returns, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Return distribution error: {0}")]
    Distribution(String),
}

/// Sequence forecaster errors.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Insufficient data for forecast: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Model error: {0}")]
    Model(String),
}

/// Risk level errors.
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Risk tolerance {value} outside allowed range [{min}, {max}]")]
    ToleranceOutOfRange { value: f64, min: f64, max: f64 },

    #[error("Non-finite input: {0}")]
    NonFinite(&'static str),
}

/// Result type alias for advisory operations.
pub type AdvisorResult<T> = Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err: AdvisorError = DataError::NoDataAvailable("AAPL".into()).into();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);

        let err: AdvisorError = DataError::insufficient("sma200", 200, 120).into();
        assert_eq!(err.kind(), ErrorKind::DataInsufficiency);
        assert!(err.to_string().contains("sma200"));

        let err: AdvisorError = SimulationError::InsufficientData {
            required: 1,
            available: 0,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::DataInsufficiency);

        let err = AdvisorError::ProviderTimeout {
            provider: "sentiment".into(),
            timeout_ms: 500,
        };
        assert_eq!(err.kind(), ErrorKind::ProviderTimeout);
        assert_eq!(err.kind().to_string(), "provider_timeout");
    }
}
