//! Indicator engine: computes every indicator the aggregator reads.

use advisor_core::error::{DataError, IndicatorError};
use advisor_core::traits::{Indicator, OhlcvIndicator};
use advisor_core::types::PriceSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::momentum::Rsi;
use crate::moving_average::Sma;
use crate::volatility::{Atr, RollingVolatility};

/// Rolling window lengths, in bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorWindows {
    pub rsi: usize,
    pub atr: usize,
    pub sma_short: usize,
    pub sma_long: usize,
    pub volatility: usize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self {
            rsi: 14,
            atr: 14,
            sma_short: 50,
            sma_long: 200,
            volatility: 14,
        }
    }
}

impl IndicatorWindows {
    /// Check every window can produce a value.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        let checks = [
            (IndicatorKind::Rsi, self.rsi, 1),
            (IndicatorKind::Atr, self.atr, 1),
            (IndicatorKind::SmaShort, self.sma_short, 1),
            (IndicatorKind::SmaLong, self.sma_long, 1),
            (IndicatorKind::Volatility, self.volatility, 2),
        ];
        for (kind, window, min) in checks {
            if window < min {
                return Err(IndicatorError::InvalidParameter(format!(
                    "{kind} window must be at least {min}, got {window}"
                )));
            }
        }
        Ok(())
    }

    /// Bars needed before `kind` has its first defined value.
    pub fn required_bars(&self, kind: IndicatorKind) -> usize {
        match kind {
            IndicatorKind::Rsi => self.rsi + 1,
            IndicatorKind::Atr => self.atr,
            IndicatorKind::SmaShort => self.sma_short,
            IndicatorKind::SmaLong => self.sma_long,
            IndicatorKind::Volatility => self.volatility + 1,
        }
    }
}

/// The indicators held in an [`IndicatorSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Rsi,
    Atr,
    SmaShort,
    SmaLong,
    Volatility,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::Rsi,
        IndicatorKind::Atr,
        IndicatorKind::SmaShort,
        IndicatorKind::SmaLong,
        IndicatorKind::Volatility,
    ];
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Rsi => write!(f, "RSI"),
            IndicatorKind::Atr => write!(f, "ATR"),
            IndicatorKind::SmaShort => write!(f, "SMA short"),
            IndicatorKind::SmaLong => write!(f, "SMA long"),
            IndicatorKind::Volatility => write!(f, "volatility"),
        }
    }
}

/// Per-bar aligned indicator arrays.
///
/// Every array has one entry per input bar. Warm-up bars, and any bar whose
/// value is not a finite number, hold `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub windows: IndicatorWindows,
    pub rsi: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
    pub sma_short: Vec<Option<f64>>,
    pub sma_long: Vec<Option<f64>>,
    pub volatility: Vec<Option<f64>>,
}

impl IndicatorSet {
    /// Number of bars the set is aligned to.
    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }

    /// Aligned values for one indicator.
    pub fn values(&self, kind: IndicatorKind) -> &[Option<f64>] {
        match kind {
            IndicatorKind::Rsi => &self.rsi,
            IndicatorKind::Atr => &self.atr,
            IndicatorKind::SmaShort => &self.sma_short,
            IndicatorKind::SmaLong => &self.sma_long,
            IndicatorKind::Volatility => &self.volatility,
        }
    }

    /// Most recent defined value, if any.
    pub fn last(&self, kind: IndicatorKind) -> Option<f64> {
        last_defined(self.values(kind))
    }

    /// Most recent defined value, or a data-insufficiency error naming the
    /// indicator.
    pub fn require(&self, kind: IndicatorKind) -> Result<f64, DataError> {
        self.last(kind).ok_or_else(|| {
            DataError::insufficient(
                kind.to_string(),
                self.windows.required_bars(kind),
                self.len(),
            )
        })
    }

    pub fn last_rsi(&self) -> Option<f64> {
        self.last(IndicatorKind::Rsi)
    }

    pub fn last_atr(&self) -> Option<f64> {
        self.last(IndicatorKind::Atr)
    }

    pub fn last_volatility(&self) -> Option<f64> {
        self.last(IndicatorKind::Volatility)
    }
}

/// Last `Some` in an aligned array.
pub fn last_defined(values: &[Option<f64>]) -> Option<f64> {
    values.iter().rev().find_map(|v| *v)
}

fn finite_only(values: Vec<Option<f64>>) -> Vec<Option<f64>> {
    values
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect()
}

/// Computes an [`IndicatorSet`] for a series.
///
/// Holds no state between calls.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    windows: IndicatorWindows,
    rsi: Rsi,
    atr: Atr,
    sma_short: Sma,
    sma_long: Sma,
    volatility: RollingVolatility,
}

impl IndicatorEngine {
    pub fn new(windows: IndicatorWindows) -> Result<Self, IndicatorError> {
        windows.validate()?;
        Ok(Self {
            windows,
            rsi: Rsi::new(windows.rsi),
            atr: Atr::new(windows.atr),
            sma_short: Sma::new(windows.sma_short),
            sma_long: Sma::new(windows.sma_long),
            volatility: RollingVolatility::new(windows.volatility),
        })
    }

    pub fn windows(&self) -> &IndicatorWindows {
        &self.windows
    }

    /// Compute all indicators. Short series yield `None` entries, never an error.
    pub fn compute(&self, series: &PriceSeries) -> IndicatorSet {
        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();

        let set = IndicatorSet {
            windows: self.windows,
            rsi: finite_only(self.rsi.calculate_aligned(&closes)),
            atr: finite_only(self.atr.calculate_aligned(&highs, &lows, &closes)),
            sma_short: finite_only(self.sma_short.calculate_aligned(&closes)),
            sma_long: finite_only(self.sma_long.calculate_aligned(&closes)),
            volatility: finite_only(self.volatility.calculate_aligned(&closes)),
        };

        debug!(
            symbol = %series.symbol,
            bars = series.len(),
            rsi = ?set.last_rsi(),
            atr = ?set.last_atr(),
            volatility = ?set.last_volatility(),
            "Computed indicators"
        );

        set
    }
}

/// Compute indicators with the given windows.
pub fn compute_indicators(
    series: &PriceSeries,
    windows: IndicatorWindows,
) -> Result<IndicatorSet, IndicatorError> {
    Ok(IndicatorEngine::new(windows)?.compute(series))
}
