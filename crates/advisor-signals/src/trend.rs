//! Short-term trend and volume heuristics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pattern of the last three closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendPattern {
    Bullish3Day,
    Bearish3Day,
    ReboundForming,
    Flat,
}

impl TrendPattern {
    /// Classify from the last three values of `closes`. Fewer than three is flat.
    pub fn from_closes(closes: &[f64]) -> Self {
        let [a, b, c] = match closes {
            [.., a, b, c] => [*a, *b, *c],
            _ => return TrendPattern::Flat,
        };

        if a < b && b < c {
            TrendPattern::Bullish3Day
        } else if a > b && b > c {
            TrendPattern::Bearish3Day
        } else if b < a && c > b {
            TrendPattern::ReboundForming
        } else {
            TrendPattern::Flat
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(self, TrendPattern::Bullish3Day)
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, TrendPattern::Bearish3Day)
    }
}

impl fmt::Display for TrendPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendPattern::Bullish3Day => write!(f, "3-day bullish"),
            TrendPattern::Bearish3Day => write!(f, "3-day bearish"),
            TrendPattern::ReboundForming => write!(f, "Rebound forming"),
            TrendPattern::Flat => write!(f, "Flat/no clear trend"),
        }
    }
}

/// Latest volume against the mean of the whole series, in signed percent.
///
/// An empty series or a zero mean volume reads as no spike (0).
pub fn volume_spike_pct(volumes: &[f64]) -> f64 {
    let Some(&latest) = volumes.last() else {
        return 0.0;
    };
    let mean = volumes.iter().sum::<f64>() / volumes.len() as f64;
    if mean == 0.0 || !mean.is_finite() {
        return 0.0;
    }
    (latest - mean) / mean * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_patterns() {
        assert_eq!(TrendPattern::from_closes(&[1.0, 2.0, 3.0]), TrendPattern::Bullish3Day);
        assert_eq!(TrendPattern::from_closes(&[3.0, 2.0, 1.0]), TrendPattern::Bearish3Day);
        assert_eq!(TrendPattern::from_closes(&[3.0, 1.0, 2.0]), TrendPattern::ReboundForming);
        assert_eq!(TrendPattern::from_closes(&[1.0, 1.0, 1.0]), TrendPattern::Flat);
        assert_eq!(TrendPattern::from_closes(&[1.0, 3.0, 2.0]), TrendPattern::Flat);
    }

    #[test]
    fn test_trend_uses_last_three() {
        assert_eq!(
            TrendPattern::from_closes(&[9.0, 8.0, 1.0, 2.0, 3.0]),
            TrendPattern::Bullish3Day
        );
    }

    #[test]
    fn test_short_series_is_flat() {
        assert_eq!(TrendPattern::from_closes(&[1.0, 2.0]), TrendPattern::Flat);
        assert_eq!(TrendPattern::from_closes(&[]), TrendPattern::Flat);
    }

    #[test]
    fn test_volume_spike() {
        // mean 150, latest 200 -> +33.3%
        let spike = volume_spike_pct(&[100.0, 150.0, 200.0]);
        assert!((spike - 100.0 / 3.0).abs() < 1e-9);

        let drop = volume_spike_pct(&[300.0, 300.0, 0.0]);
        assert!((drop + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_volume_spike_degenerate() {
        assert_eq!(volume_spike_pct(&[]), 0.0);
        assert_eq!(volume_spike_pct(&[0.0, 0.0]), 0.0);
    }
}
