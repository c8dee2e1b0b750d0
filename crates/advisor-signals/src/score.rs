//! Composite score and confidence grade.

use advisor_core::types::SentimentSignal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{AggregatorConfig, GradeCutoffs};
use crate::trend::TrendPattern;

/// Confidence attached to a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceGrade {
    #[serde(rename = "none")]
    Unrated,
    Low,
    Medium,
    High,
}

impl ConfidenceGrade {
    pub fn from_score(score: u32, cutoffs: &GradeCutoffs) -> Self {
        if score >= cutoffs.high {
            ConfidenceGrade::High
        } else if score >= cutoffs.medium {
            ConfidenceGrade::Medium
        } else if score >= cutoffs.low {
            ConfidenceGrade::Low
        } else {
            ConfidenceGrade::Unrated
        }
    }
}

impl fmt::Display for ConfidenceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceGrade::High => write!(f, "High"),
            ConfidenceGrade::Medium => write!(f, "Medium"),
            ConfidenceGrade::Low => write!(f, "Low"),
            ConfidenceGrade::Unrated => write!(f, "None"),
        }
    }
}

/// Points contributed by each factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub bullish_trend: u32,
    pub oversold: u32,
    pub positive_sentiment: u32,
    pub volume_spike: u32,
    pub rebound: u32,
}

impl ScoreBreakdown {
    pub fn compute(
        trend: TrendPattern,
        rsi: f64,
        sentiment: &SentimentSignal,
        volume_spike_pct: f64,
        config: &AggregatorConfig,
    ) -> Self {
        let w = &config.weights;
        let strength = config.sentiment_strengths.for_label(sentiment.label);
        let points = |hit: bool, weight: u32| if hit { weight } else { 0 };

        Self {
            bullish_trend: points(trend.is_bullish(), w.bullish_trend),
            oversold: points(rsi < config.rsi_oversold, w.oversold),
            positive_sentiment: points(strength > config.sentiment_cutoff, w.positive_sentiment),
            volume_spike: points(volume_spike_pct > config.volume_spike_pct, w.volume_spike),
            rebound: points(
                trend == TrendPattern::ReboundForming && rsi < config.rebound_rsi_ceiling,
                w.rebound,
            ),
        }
    }

    pub fn total(&self) -> u32 {
        self.bullish_trend + self.oversold + self.positive_sentiment + self.volume_spike + self.rebound
    }
}
