//! Sentiment signals supplied by an external news/sentiment collaborator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Average polarity above which headlines read as positive.
pub const POSITIVE_POLARITY: f64 = 0.15;
/// Average polarity below which headlines read as negative.
pub const NEGATIVE_POLARITY: f64 = -0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SentimentLabel {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        };
        write!(f, "{}", s)
    }
}

/// Opaque sentiment input to the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SentimentSignal {
    pub label: SentimentLabel,
    /// Score in [-1, 1]
    pub score: f64,
}

impl SentimentSignal {
    /// Create a signal; the score is clamped to [-1, 1] and NaN becomes 0.
    pub fn new(label: SentimentLabel, score: f64) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(-1.0, 1.0) };
        Self { label, score }
    }

    /// The fallback used whenever the provider is unavailable or unconfigured.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Label a raw polarity score using the headline thresholds.
    pub fn from_score(score: f64) -> Self {
        let label = if score > POSITIVE_POLARITY {
            SentimentLabel::Positive
        } else if score < NEGATIVE_POLARITY {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        Self::new(label, score)
    }

    /// Average per-article polarity scores into one signal.
    pub fn from_polarities(polarities: &[f64]) -> Self {
        if polarities.is_empty() {
            return Self::neutral();
        }
        let avg = polarities.iter().sum::<f64>() / polarities.len() as f64;
        Self::from_score(avg)
    }

    pub fn is_positive(&self) -> bool {
        self.label == SentimentLabel::Positive
    }
}
