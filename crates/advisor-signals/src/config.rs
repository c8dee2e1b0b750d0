//! Aggregator thresholds.

use advisor_core::error::AdvisorError;
use advisor_core::types::SentimentLabel;
use serde::{Deserialize, Serialize};

/// Strength assigned to each sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentStrengths {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl Default for SentimentStrengths {
    fn default() -> Self {
        Self {
            positive: 0.88,
            neutral: 0.70,
            negative: 0.50,
        }
    }
}

impl SentimentStrengths {
    pub fn for_label(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }
}

/// Points added to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub bullish_trend: u32,
    pub oversold: u32,
    pub positive_sentiment: u32,
    pub volume_spike: u32,
    pub rebound: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            bullish_trend: 2,
            oversold: 1,
            positive_sentiment: 2,
            volume_spike: 1,
            rebound: 1,
        }
    }
}

/// Minimum score for each grade and decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeCutoffs {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for GradeCutoffs {
    fn default() -> Self {
        Self {
            high: 6,
            medium: 4,
            low: 2,
        }
    }
}

/// Configuration for the signal aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// RSI below this is oversold.
    pub rsi_oversold: f64,
    /// RSI above this is overbought.
    pub rsi_overbought: f64,
    /// A rebound only scores while RSI is below this.
    pub rebound_rsi_ceiling: f64,
    /// Multiplier on the current price when no forecast is available.
    pub placeholder_uplift: f64,
    /// Volume spike (percent) above which volume scores.
    pub volume_spike_pct: f64,
    /// Volume spike (percent) below which the symbol is avoided.
    pub low_interest_volume_pct: f64,
    pub sentiment_strengths: SentimentStrengths,
    /// Sentiment strength above which sentiment scores.
    pub sentiment_cutoff: f64,
    pub weights: ScoreWeights,
    pub cutoffs: GradeCutoffs,
    /// Minimum score for the batch fallback promotion.
    pub fallback_min_score: u32,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rebound_rsi_ceiling: 40.0,
            placeholder_uplift: 1.02,
            volume_spike_pct: 10.0,
            low_interest_volume_pct: -50.0,
            sentiment_strengths: SentimentStrengths::default(),
            sentiment_cutoff: 0.8,
            weights: ScoreWeights::default(),
            cutoffs: GradeCutoffs::default(),
            fallback_min_score: 2,
        }
    }
}

impl AggregatorConfig {
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if !(0.0..=100.0).contains(&self.rsi_oversold)
            || !(0.0..=100.0).contains(&self.rsi_overbought)
            || self.rsi_oversold >= self.rsi_overbought
        {
            return Err(AdvisorError::Config(format!(
                "RSI thresholds must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        if !(self.placeholder_uplift.is_finite() && self.placeholder_uplift > 0.0) {
            return Err(AdvisorError::Config(format!(
                "placeholder_uplift must be positive, got {}",
                self.placeholder_uplift
            )));
        }
        let GradeCutoffs { high, medium, low } = self.cutoffs;
        if !(high >= medium && medium >= low) {
            return Err(AdvisorError::Config(format!(
                "grade cutoffs must be ordered high >= medium >= low, got {high}/{medium}/{low}"
            )));
        }
        Ok(())
    }
}
