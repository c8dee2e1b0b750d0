//! Technical classification from predicted price and RSI.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::AggregatorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalDecision {
    BuyOpportunity,
    HoldOverbought,
    Invest,
    Avoid,
}

impl TechnicalDecision {
    /// Upside with oversold RSI is a buy opportunity, upside with overbought
    /// RSI a hold; no upside is avoid.
    pub fn classify(current_price: f64, predicted_price: f64, rsi: f64, config: &AggregatorConfig) -> Self {
        if predicted_price > current_price {
            if rsi < config.rsi_oversold {
                TechnicalDecision::BuyOpportunity
            } else if rsi > config.rsi_overbought {
                TechnicalDecision::HoldOverbought
            } else {
                TechnicalDecision::Invest
            }
        } else {
            TechnicalDecision::Avoid
        }
    }
}

impl fmt::Display for TechnicalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TechnicalDecision::BuyOpportunity => write!(f, "Buy opportunity"),
            TechnicalDecision::HoldOverbought => write!(f, "Hold (overbought)"),
            TechnicalDecision::Invest => write!(f, "Invest"),
            TechnicalDecision::Avoid => write!(f, "Avoid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let config = AggregatorConfig::default();
        assert_eq!(
            TechnicalDecision::classify(100.0, 102.0, 25.0, &config),
            TechnicalDecision::BuyOpportunity
        );
        assert_eq!(
            TechnicalDecision::classify(100.0, 102.0, 75.0, &config),
            TechnicalDecision::HoldOverbought
        );
        assert_eq!(
            TechnicalDecision::classify(100.0, 102.0, 50.0, &config),
            TechnicalDecision::Invest
        );
        assert_eq!(
            TechnicalDecision::classify(100.0, 100.0, 25.0, &config),
            TechnicalDecision::Avoid
        );
        assert_eq!(TechnicalDecision::HoldOverbought.to_string(), "Hold (overbought)");
    }
}
