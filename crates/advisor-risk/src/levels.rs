//! Stop-loss and take-profit levels.

use advisor_core::error::RiskError;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do with a risk tolerance outside the allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Pull the value to the nearest bound.
    #[default]
    Clamp,
    /// Fail the request.
    Reject,
}

/// Risk tolerance bounds and exit multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    /// Tolerance used when the caller gives none.
    pub default_tolerance: f64,
    pub min_tolerance: f64,
    pub max_tolerance: f64,
    pub policy: OutOfRangePolicy,
    /// ATR multiple for the stop, scaled by `2 - tolerance`.
    pub stop_multiplier: Decimal,
    /// ATR multiple for the target, scaled by `tolerance`.
    pub target_multiplier: Decimal,
    /// Decimal places kept on reported levels.
    pub decimal_places: u32,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            default_tolerance: 1.0,
            min_tolerance: 0.1,
            max_tolerance: 2.0,
            policy: OutOfRangePolicy::Clamp,
            stop_multiplier: dec!(1.5),
            target_multiplier: dec!(2.5),
            decimal_places: 2,
        }
    }
}

impl RiskSettings {
    /// Check the settings are coherent.
    pub fn validate(&self) -> Result<(), RiskError> {
        if !(self.min_tolerance > 0.0 && self.min_tolerance <= self.max_tolerance && self.max_tolerance <= 2.0) {
            return Err(RiskError::ToleranceOutOfRange {
                value: self.min_tolerance,
                min: 0.0,
                max: 2.0,
            });
        }
        if !(self.min_tolerance..=self.max_tolerance).contains(&self.default_tolerance) {
            return Err(RiskError::ToleranceOutOfRange {
                value: self.default_tolerance,
                min: self.min_tolerance,
                max: self.max_tolerance,
            });
        }
        Ok(())
    }

    /// Effective tolerance for a request.
    pub fn resolve_tolerance(&self, requested: Option<f64>) -> Result<f64, RiskError> {
        let Some(value) = requested else {
            return Ok(self.default_tolerance);
        };
        if !value.is_finite() {
            return Err(RiskError::NonFinite("risk tolerance"));
        }
        if (self.min_tolerance..=self.max_tolerance).contains(&value) {
            return Ok(value);
        }

        match self.policy {
            OutOfRangePolicy::Clamp => {
                let clamped = value.clamp(self.min_tolerance, self.max_tolerance);
                warn!(requested = value, clamped, "Risk tolerance out of range, clamping");
                Ok(clamped)
            }
            OutOfRangePolicy::Reject => Err(RiskError::ToleranceOutOfRange {
                value,
                min: self.min_tolerance,
                max: self.max_tolerance,
            }),
        }
    }
}

/// Exit levels for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub risk_tolerance: f64,
}

/// Computes [`RiskLevels`] from price, ATR and tolerance.
#[derive(Debug, Clone, Default)]
pub struct RiskCalculator {
    settings: RiskSettings,
}

impl RiskCalculator {
    pub fn new(settings: RiskSettings) -> Result<Self, RiskError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &RiskSettings {
        &self.settings
    }

    /// `stop = price - atr * stop_multiplier * (2 - tolerance)`,
    /// `target = price + atr * target_multiplier * tolerance`.
    pub fn levels(
        &self,
        current_price: f64,
        atr: f64,
        requested_tolerance: Option<f64>,
    ) -> Result<RiskLevels, RiskError> {
        let tolerance = self.settings.resolve_tolerance(requested_tolerance)?;

        let price = to_decimal(current_price, "current price")?;
        let atr = to_decimal(atr, "ATR")?;
        let tol = to_decimal(tolerance, "risk tolerance")?;

        let stop_offset = atr * self.settings.stop_multiplier * (dec!(2) - tol);
        let target_offset = atr * self.settings.target_multiplier * tol;
        let dp = self.settings.decimal_places;

        Ok(RiskLevels {
            stop_loss: (price - stop_offset).round_dp(dp),
            take_profit: (price + target_offset).round_dp(dp),
            risk_tolerance: tolerance,
        })
    }
}

fn to_decimal(value: f64, what: &'static str) -> Result<Decimal, RiskError> {
    if !value.is_finite() {
        return Err(RiskError::NonFinite(what));
    }
    Decimal::from_f64(value).ok_or(RiskError::NonFinite(what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels() {
        let calc = RiskCalculator::default();
        let levels = calc.levels(100.0, 2.0, None).unwrap();
        // stop = 100 - 2 * 1.5 * 1, target = 100 + 2 * 2.5 * 1
        assert_eq!(levels.stop_loss, dec!(97.00));
        assert_eq!(levels.take_profit, dec!(105.00));
        assert_eq!(levels.risk_tolerance, 1.0);
    }

    #[test]
    fn test_high_tolerance_tightens_stop_and_widens_target() {
        let calc = RiskCalculator::default();
        let levels = calc.levels(100.0, 2.0, Some(2.0)).unwrap();
        assert_eq!(levels.stop_loss, dec!(100));
        assert_eq!(levels.take_profit, dec!(110));
    }

    #[test]
    fn test_rounding() {
        let calc = RiskCalculator::default();
        let levels = calc.levels(123.456, 1.2345, Some(0.5)).unwrap();
        // stop = 123.456 - 1.2345 * 1.5 * 1.5 = 120.678375
        assert_eq!(levels.stop_loss, dec!(120.68));
        // target = 123.456 + 1.2345 * 2.5 * 0.5 = 125.0991...
        assert_eq!(levels.take_profit, dec!(125.10));
    }

    #[test]
    fn test_clamp_policy() {
        let settings = RiskSettings::default();
        assert_eq!(settings.resolve_tolerance(Some(5.0)).unwrap(), 2.0);
        assert_eq!(settings.resolve_tolerance(Some(0.0)).unwrap(), 0.1);
        assert_eq!(settings.resolve_tolerance(Some(0.7)).unwrap(), 0.7);
    }

    #[test]
    fn test_reject_policy() {
        let settings = RiskSettings {
            policy: OutOfRangePolicy::Reject,
            ..Default::default()
        };
        let err = settings.resolve_tolerance(Some(2.5)).unwrap_err();
        assert!(matches!(err, RiskError::ToleranceOutOfRange { .. }));
        assert!(settings.resolve_tolerance(Some(2.0)).is_ok());
    }

    #[test]
    fn test_non_finite_inputs() {
        let calc = RiskCalculator::default();
        assert!(matches!(
            calc.levels(100.0, f64::NAN, None),
            Err(RiskError::NonFinite("ATR"))
        ));
        assert!(matches!(
            calc.levels(100.0, 1.0, Some(f64::INFINITY)),
            Err(RiskError::NonFinite(_))
        ));
    }

    #[test]
    fn test_invalid_settings() {
        let settings = RiskSettings {
            min_tolerance: 1.5,
            max_tolerance: 1.0,
            ..Default::default()
        };
        assert!(RiskCalculator::new(settings).is_err());
    }
}
