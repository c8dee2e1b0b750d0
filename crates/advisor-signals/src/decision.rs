//! Final decision and the per-symbol report.

use advisor_core::types::SentimentLabel;
use advisor_forecast::ForecastSummary;
use advisor_simulation::{Outlook, SimulationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::GradeCutoffs;
use crate::score::{ConfidenceGrade, ScoreBreakdown};
use crate::technical::TechnicalDecision;
use crate::trend::TrendPattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalDecision {
    InvestStrongly,
    Invest,
    ReviewFurther,
    Avoid,
}

impl FinalDecision {
    pub fn from_score(score: u32, cutoffs: &GradeCutoffs) -> Self {
        if score >= cutoffs.high {
            FinalDecision::InvestStrongly
        } else if score >= cutoffs.medium {
            FinalDecision::Invest
        } else if score >= cutoffs.low {
            FinalDecision::ReviewFurther
        } else {
            FinalDecision::Avoid
        }
    }
}

impl fmt::Display for FinalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalDecision::InvestStrongly => write!(f, "Invest strongly"),
            FinalDecision::Invest => write!(f, "Invest"),
            FinalDecision::ReviewFurther => write!(f, "Review further"),
            FinalDecision::Avoid => write!(f, "Avoid"),
        }
    }
}

/// Whether two signals disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictFlag {
    #[default]
    None,
    /// Overbought RSI alongside positive sentiment.
    Mixed,
}

impl fmt::Display for ConflictFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictFlag::None => write!(f, "No conflict"),
            ConflictFlag::Mixed => write!(f, "Mixed"),
        }
    }
}

/// Which rule produced the final decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    Conflict,
    LowInterestOrBearish,
    Score,
    BatchFallback,
}

/// Aggregated assessment of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    pub symbol: String,
    pub current_price: f64,
    /// Forecast next close, or the placeholder uplift of the current price.
    pub predicted_price: f64,
    pub rsi: f64,
    /// Daily volatility of returns; `None` while in warm-up.
    pub volatility: Option<f64>,
    pub atr: f64,
    pub technical_decision: TechnicalDecision,
    pub trend: TrendPattern,
    pub volume_spike_pct: f64,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub combined_score: u32,
    pub final_decision: FinalDecision,
    pub decision_reason: DecisionReason,
    pub confidence_grade: ConfidenceGrade,
    pub conflict_flag: ConflictFlag,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    pub risk_tolerance: f64,
    pub simulation: Option<SimulationResult>,
    pub outlook: Option<Outlook>,
    pub forecast: Option<ForecastSummary>,
}

impl DecisionReport {
    /// Copy of this report with the decision raised to "Review further" by
    /// the batch fallback.
    pub fn promoted(&self) -> Self {
        Self {
            final_decision: FinalDecision::ReviewFurther,
            decision_reason: DecisionReason::BatchFallback,
            ..self.clone()
        }
    }
}
