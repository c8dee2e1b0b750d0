//! Signal aggregator.

use advisor_core::error::{AdvisorError, DataError};
use advisor_core::types::{PriceSeries, SentimentSignal};
use advisor_forecast::ForecastResult;
use advisor_indicators::{IndicatorKind, IndicatorSet};
use advisor_risk::RiskCalculator;
use advisor_simulation::SimulationResult;
use tracing::debug;

use crate::config::AggregatorConfig;
use crate::decision::{ConflictFlag, DecisionReason, DecisionReport, FinalDecision};
use crate::score::{ConfidenceGrade, ScoreBreakdown};
use crate::technical::TechnicalDecision;
use crate::trend::{volume_spike_pct, TrendPattern};

/// Everything the aggregator reads for one symbol.
#[derive(Debug, Clone, Copy)]
pub struct AggregationInput<'a> {
    /// Source of closes (current price, 3-day trend) and volumes.
    pub series: &'a PriceSeries,
    pub indicators: &'a IndicatorSet,
    pub simulation: Option<&'a SimulationResult>,
    pub forecast: Option<&'a ForecastResult>,
    pub sentiment: SentimentSignal,
    /// `None` uses the configured default.
    pub risk_tolerance: Option<f64>,
}

/// Combines signals into a [`DecisionReport`].
#[derive(Debug, Clone, Default)]
pub struct SignalAggregator {
    config: AggregatorConfig,
    risk: RiskCalculator,
}

impl SignalAggregator {
    pub fn new(config: AggregatorConfig, risk: RiskCalculator) -> Result<Self, AdvisorError> {
        config.validate()?;
        Ok(Self { config, risk })
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Aggregate one symbol.
    ///
    /// Fails only when RSI or ATR has no defined value, or the risk tolerance
    /// is rejected.
    pub fn aggregate(&self, input: AggregationInput<'_>) -> Result<DecisionReport, AdvisorError> {
        let config = &self.config;
        let series = input.series;

        let current_price = series
            .last_close()
            .ok_or_else(|| DataError::NoDataAvailable(series.symbol.clone()))?;
        let rsi = input.indicators.require(IndicatorKind::Rsi)?;
        let atr = input.indicators.require(IndicatorKind::Atr)?;
        let volatility = input.indicators.last_volatility();

        let predicted_price = input
            .forecast
            .and_then(ForecastResult::next_price)
            .unwrap_or(current_price * config.placeholder_uplift);

        let technical_decision = TechnicalDecision::classify(current_price, predicted_price, rsi, config);
        let trend = TrendPattern::from_closes(&series.closes());
        let volume_spike = volume_spike_pct(&series.volumes());

        let levels = self.risk.levels(current_price, atr, input.risk_tolerance)?;

        let breakdown = ScoreBreakdown::compute(trend, rsi, &input.sentiment, volume_spike, config);
        let score = breakdown.total();
        let confidence_grade = ConfidenceGrade::from_score(score, &config.cutoffs);

        let conflict = rsi > config.rsi_overbought && input.sentiment.is_positive();
        let low_interest = volume_spike < config.low_interest_volume_pct
            || (trend.is_bearish() && score < config.cutoffs.medium);

        let (final_decision, decision_reason, conflict_flag) = if conflict {
            (FinalDecision::ReviewFurther, DecisionReason::Conflict, ConflictFlag::Mixed)
        } else if low_interest {
            (FinalDecision::Avoid, DecisionReason::LowInterestOrBearish, ConflictFlag::None)
        } else {
            (
                FinalDecision::from_score(score, &config.cutoffs),
                DecisionReason::Score,
                ConflictFlag::None,
            )
        };

        debug!(
            symbol = %series.symbol,
            current_price,
            predicted_price,
            rsi,
            atr,
            volume_spike,
            %trend,
            score,
            %final_decision,
            ?decision_reason,
            "Aggregated signals"
        );

        Ok(DecisionReport {
            symbol: series.symbol.clone(),
            current_price,
            predicted_price,
            rsi,
            volatility,
            atr,
            technical_decision,
            trend,
            volume_spike_pct: volume_spike,
            sentiment_label: input.sentiment.label,
            sentiment_score: input.sentiment.score,
            score_breakdown: breakdown,
            combined_score: score,
            final_decision,
            decision_reason,
            confidence_grade,
            conflict_flag,
            stop_loss: levels.stop_loss,
            take_profit: levels.take_profit,
            risk_tolerance: levels.risk_tolerance,
            simulation: input.simulation.cloned(),
            outlook: input.simulation.map(SimulationResult::outlook),
            forecast: input.forecast.map(ForecastResult::summary),
        })
    }
}
