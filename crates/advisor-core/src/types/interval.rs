//! Lookup window definitions for market data requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// Trading sessions per calendar year.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Interval between bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    /// 1 minute bars
    #[serde(rename = "1m")]
    Minute1,
    /// 5 minute bars
    #[serde(rename = "5m")]
    Minute5,
    /// 15 minute bars
    #[serde(rename = "15m")]
    Minute15,
    /// 30 minute bars
    #[serde(rename = "30m")]
    Minute30,
    /// 1 hour bars
    #[serde(rename = "60m")]
    Hour1,
    /// Daily bars
    #[serde(rename = "1d")]
    #[default]
    Daily,
    /// Weekly bars
    #[serde(rename = "1wk")]
    Weekly,
    /// Monthly bars
    #[serde(rename = "1mo")]
    Monthly,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Interval::Minute1 => "1m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Hour1 => "60m",
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Interval {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" => Ok(Interval::Minute1),
            "5m" | "5min" => Ok(Interval::Minute5),
            "15m" | "15min" => Ok(Interval::Minute15),
            "30m" | "30min" => Ok(Interval::Minute30),
            "60m" | "1h" | "hour" => Ok(Interval::Hour1),
            "1d" | "day" | "daily" => Ok(Interval::Daily),
            "1wk" | "1w" | "week" | "weekly" => Ok(Interval::Weekly),
            "1mo" | "month" | "monthly" => Ok(Interval::Monthly),
            _ => Err(DataError::InvalidInterval(s.to_string())),
        }
    }
}

/// Lookup window requested from a market data provider ("1mo", "1y", "max").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    Days(u32),
    Months(u32),
    Years(u32),
    Max,
}

impl Period {
    /// Approximate calendar days covered, `None` for [`Period::Max`].
    pub fn calendar_days(&self) -> Option<u32> {
        match self {
            Period::Days(n) => Some(*n),
            Period::Months(n) => Some(n * 30),
            Period::Years(n) => Some(n * 365),
            Period::Max => None,
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Years(1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Days(n) => write!(f, "{}d", n),
            Period::Months(n) => write!(f, "{}mo", n),
            Period::Years(n) => write!(f, "{}y", n),
            Period::Max => write!(f, "max"),
        }
    }
}

impl FromStr for Period {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "max" {
            return Ok(Period::Max);
        }
        let split = lower
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| DataError::InvalidPeriod(s.to_string()))?;
        let (digits, unit) = lower.split_at(split);
        let n: u32 = digits
            .parse()
            .map_err(|_| DataError::InvalidPeriod(s.to_string()))?;
        if n == 0 {
            return Err(DataError::InvalidPeriod(s.to_string()));
        }
        match unit {
            "d" => Ok(Period::Days(n)),
            "mo" => Ok(Period::Months(n)),
            "y" => Ok(Period::Years(n)),
            _ => Err(DataError::InvalidPeriod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_parse() {
        assert_eq!(Interval::from_str("1d").unwrap(), Interval::Daily);
        assert_eq!(Interval::from_str("15m").unwrap(), Interval::Minute15);
        assert_eq!(Interval::from_str("1h").unwrap(), Interval::Hour1);
        assert!(Interval::from_str("7x").is_err());
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(Interval::Daily.to_string(), "1d");
        assert_eq!(Interval::Hour1.to_string(), "60m");
        assert_eq!(Interval::Weekly.to_string(), "1wk");
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(Period::from_str("1y").unwrap(), Period::Years(1));
        assert_eq!(Period::from_str("1mo").unwrap(), Period::Months(1));
        assert_eq!(Period::from_str("5d").unwrap(), Period::Days(5));
        assert_eq!(Period::from_str("MAX").unwrap(), Period::Max);
        assert!(Period::from_str("0y").is_err());
        assert!(Period::from_str("y").is_err());
        assert!(Period::from_str("3w").is_err());
    }

    #[test]
    fn test_period_calendar_days() {
        assert_eq!(Period::Years(2).calendar_days(), Some(730));
        assert_eq!(Period::Months(3).calendar_days(), Some(90));
        assert_eq!(Period::Max.calendar_days(), None);
        assert_eq!(Period::Years(2).to_string(), "2y");
    }
}
