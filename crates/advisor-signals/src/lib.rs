//! Signal aggregation.
//!
//! Reconciles indicator readings, the optional simulator and forecaster
//! outputs, volume and trend heuristics and an external sentiment signal into
//! one [`DecisionReport`] per symbol. Every threshold comes from
//! [`AggregatorConfig`].
//!
//! Decision precedence, highest first:
//! 1. Conflict: overbought RSI with positive sentiment forces "Review further".
//! 2. Low interest or bearish: a collapsed volume or a 3-day bearish trend
//!    with a sub-medium score forces "Avoid".
//! 3. Score mapping.
//!
//! After a multi-symbol batch resolves, [`select_fallback`] may promote the
//! best-scoring "Avoid" to "Review further" so a batch never comes back
//! uniformly negative.

pub mod aggregator;
pub mod config;
pub mod decision;
pub mod fallback;
pub mod score;
pub mod technical;
pub mod trend;

pub use aggregator::{AggregationInput, SignalAggregator};
pub use config::{AggregatorConfig, GradeCutoffs, ScoreWeights, SentimentStrengths};
pub use decision::{ConflictFlag, DecisionReason, DecisionReport, FinalDecision};
pub use fallback::{apply_batch_fallback, select_fallback};
pub use score::{ConfidenceGrade, ScoreBreakdown};
pub use technical::TechnicalDecision;
pub use trend::{volume_spike_pct, TrendPattern};
