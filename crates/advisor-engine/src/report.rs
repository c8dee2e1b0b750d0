//! Caller-facing report shapes.

use advisor_core::error::{AdvisorError, ErrorKind};
use advisor_core::types::SentimentLabel;
use advisor_forecast::{ForecastSummary, Trend};
use advisor_indicators::annualize;
use advisor_signals::{
    ConfidenceGrade, ConflictFlag, DecisionReason, DecisionReport, FinalDecision,
    TechnicalDecision, TrendPattern,
};
use advisor_simulation::{Outlook, SimulationResult};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PRICE_DP: u32 = 2;
const VOLATILITY_DP: u32 = 4;

/// Round a float through `Decimal`; non-finite values become `None`.
fn round(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp(dp))
}

/// Monte Carlo bounds as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationView {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub worst_case: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub best_case: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub expected_value: Option<Decimal>,
    pub simulation_count: usize,
    pub horizon_days: usize,
    pub outlook: Outlook,
}

impl From<&SimulationResult> for SimulationView {
    fn from(sim: &SimulationResult) -> Self {
        Self {
            worst_case: round(sim.worst_case, PRICE_DP),
            best_case: round(sim.best_case, PRICE_DP),
            expected_value: round(sim.expected_value, PRICE_DP),
            simulation_count: sim.simulation_count,
            horizon_days: sim.horizon_days,
            outlook: sim.outlook(),
        }
    }
}

/// Forecast summary as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastView {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub start_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub end_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub percentage_change: Option<Decimal>,
    pub trend: Trend,
    pub recommendation: String,
}

impl From<&ForecastSummary> for ForecastView {
    fn from(summary: &ForecastSummary) -> Self {
        Self {
            start_price: round(summary.start_price, PRICE_DP),
            end_price: round(summary.end_price, PRICE_DP),
            percentage_change: round(summary.percentage_change, PRICE_DP),
            trend: summary.trend,
            recommendation: summary.recommendation.clone(),
        }
    }
}

/// Successful analysis of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub current_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub predicted_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub rsi: Option<Decimal>,
    /// Daily volatility of returns.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub volatility: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub annualized_volatility: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub atr: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub stop_loss: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub take_profit: Decimal,
    pub risk_tolerance: f64,
    pub technical_decision: TechnicalDecision,
    pub trend: TrendPattern,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub volume_spike_pct: Option<Decimal>,
    pub sentiment_label: SentimentLabel,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub sentiment_score: Option<Decimal>,
    pub combined_score: u32,
    pub final_decision: FinalDecision,
    pub decision_reason: DecisionReason,
    pub confidence_grade: ConfidenceGrade,
    pub conflict_flag: ConflictFlag,
    pub simulation: Option<SimulationView>,
    pub forecast: Option<ForecastView>,
}

impl From<&DecisionReport> for AnalysisReport {
    fn from(report: &DecisionReport) -> Self {
        Self {
            symbol: report.symbol.clone(),
            current_price: round(report.current_price, PRICE_DP),
            predicted_price: round(report.predicted_price, PRICE_DP),
            rsi: round(report.rsi, PRICE_DP),
            volatility: report.volatility.and_then(|v| round(v, VOLATILITY_DP)),
            annualized_volatility: report
                .volatility
                .and_then(|v| round(annualize(v), VOLATILITY_DP)),
            atr: round(report.atr, PRICE_DP),
            stop_loss: report.stop_loss,
            take_profit: report.take_profit,
            risk_tolerance: report.risk_tolerance,
            technical_decision: report.technical_decision,
            trend: report.trend,
            volume_spike_pct: round(report.volume_spike_pct, PRICE_DP),
            sentiment_label: report.sentiment_label,
            sentiment_score: round(report.sentiment_score, PRICE_DP),
            combined_score: report.combined_score,
            final_decision: report.final_decision,
            decision_reason: report.decision_reason,
            confidence_grade: report.confidence_grade,
            conflict_flag: report.conflict_flag,
            simulation: report.simulation.as_ref().map(SimulationView::from),
            forecast: report.forecast.as_ref().map(ForecastView::from),
        }
    }
}

/// Failed symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub symbol: String,
    pub error: String,
    pub kind: ErrorKind,
}

impl ErrorReport {
    pub fn new(symbol: impl Into<String>, error: &AdvisorError) -> Self {
        Self {
            symbol: symbol.into(),
            error: error.to_string(),
            kind: error.kind(),
        }
    }
}

/// One entry of a batch response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolReport {
    Success(Box<AnalysisReport>),
    Error(ErrorReport),
}

impl SymbolReport {
    pub fn from_result(symbol: &str, result: &Result<DecisionReport, AdvisorError>) -> Self {
        match result {
            Ok(report) => SymbolReport::Success(Box::new(AnalysisReport::from(report))),
            Err(e) => SymbolReport::Error(ErrorReport::new(symbol, e)),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            SymbolReport::Success(r) => &r.symbol,
            SymbolReport::Error(e) => &e.symbol,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SymbolReport::Success(_))
    }

    pub fn analysis(&self) -> Option<&AnalysisReport> {
        match self {
            SymbolReport::Success(r) => Some(r),
            SymbolReport::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorReport> {
        match self {
            SymbolReport::Success(_) => None,
            SymbolReport::Error(e) => Some(e),
        }
    }
}

/// Complete batch response, aligned to the requested symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub reports: Vec<SymbolReport>,
}

impl BatchReport {
    pub fn new(batch_id: Uuid, reports: Vec<SymbolReport>) -> Self {
        Self {
            batch_id,
            generated_at: Utc::now(),
            reports,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.succeeded()
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     ADVISORY REPORT                        \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str(&format!("  Batch:               {}\n", self.batch_id));
        s.push_str(&format!(
            "  Generated:           {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        s.push_str(&format!(
            "  Symbols:             {} ({} ok, {} failed)\n",
            self.reports.len(),
            self.succeeded(),
            self.failed()
        ));
        s.push('\n');

        for entry in &self.reports {
            match entry {
                SymbolReport::Success(r) => push_analysis(&mut s, r),
                SymbolReport::Error(e) => {
                    s.push_str(&format!("{}\n", e.symbol));
                    s.push_str("───────────────────────────────────────────────────────────\n");
                    s.push_str(&format!("  Error ({}):   {}\n", e.kind, e.error));
                    s.push('\n');
                }
            }
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn fmt_opt(value: Option<Decimal>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

fn push_analysis(s: &mut String, r: &AnalysisReport) {
    s.push_str(&format!("{}\n", r.symbol));
    s.push_str("───────────────────────────────────────────────────────────\n");
    s.push_str(&format!("  Current Price:       {}\n", fmt_opt(r.current_price)));
    s.push_str(&format!("  Predicted Price:     {}\n", fmt_opt(r.predicted_price)));
    s.push_str(&format!("  RSI:                 {}\n", fmt_opt(r.rsi)));
    s.push_str(&format!(
        "  Volatility:          {} (annualized {})\n",
        fmt_opt(r.volatility),
        fmt_opt(r.annualized_volatility)
    ));
    s.push_str(&format!("  Stop Loss:           {}\n", r.stop_loss));
    s.push_str(&format!("  Take Profit:         {}\n", r.take_profit));
    s.push_str(&format!("  Technical:           {}\n", r.technical_decision));
    s.push_str(&format!("  Trend:               {}\n", r.trend));
    s.push_str(&format!(
        "  Sentiment:           {} ({})\n",
        r.sentiment_label,
        fmt_opt(r.sentiment_score)
    ));
    s.push_str(&format!(
        "  Score:               {} ({})\n",
        r.combined_score, r.confidence_grade
    ));
    if r.conflict_flag == ConflictFlag::Mixed {
        s.push_str(&format!("  Conflict:            {}\n", r.conflict_flag));
    }
    if let Some(sim) = &r.simulation {
        s.push_str(&format!(
            "  {}-day Range:        {} .. {} ({})\n",
            sim.horizon_days,
            fmt_opt(sim.worst_case),
            fmt_opt(sim.best_case),
            sim.outlook
        ));
    }
    if let Some(forecast) = &r.forecast {
        s.push_str(&format!(
            "  Forecast:            {} -> {} ({}%, {})\n",
            fmt_opt(forecast.start_price),
            fmt_opt(forecast.end_price),
            fmt_opt(forecast.percentage_change),
            forecast.trend
        ));
    }
    s.push_str(&format!("  Decision:            {}\n", r.final_decision));
    s.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::error::DataError;
    use advisor_signals::ScoreBreakdown;
    use rust_decimal_macros::dec;

    fn decision() -> DecisionReport {
        DecisionReport {
            symbol: "AAPL".to_string(),
            current_price: 187.456,
            predicted_price: 191.205,
            rsi: 55.5555,
            volatility: Some(0.0123456),
            atr: 3.14159,
            technical_decision: TechnicalDecision::Invest,
            trend: TrendPattern::Bullish3Day,
            volume_spike_pct: 12.345,
            sentiment_label: SentimentLabel::Positive,
            sentiment_score: 0.9,
            score_breakdown: ScoreBreakdown::default(),
            combined_score: 5,
            final_decision: FinalDecision::Invest,
            decision_reason: DecisionReason::Score,
            confidence_grade: ConfidenceGrade::Medium,
            conflict_flag: ConflictFlag::None,
            stop_loss: dec!(182.74),
            take_profit: dec!(195.31),
            risk_tolerance: 1.0,
            simulation: None,
            outlook: None,
            forecast: None,
        }
    }

    #[test]
    fn test_rounding() {
        let report = AnalysisReport::from(&decision());
        assert_eq!(report.current_price, Some(dec!(187.46)));
        assert_eq!(report.rsi, Some(dec!(55.56)));
        assert_eq!(report.volatility, Some(dec!(0.0123)));
        assert_eq!(report.annualized_volatility, Some(dec!(0.1960)));
        assert_eq!(report.atr, Some(dec!(3.14)));
    }

    #[test]
    fn test_non_finite_is_null() {
        let mut d = decision();
        d.volume_spike_pct = f64::NAN;
        d.volatility = None;
        let report = AnalysisReport::from(&d);
        assert_eq!(report.volume_spike_pct, None);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["volume_spike_pct"].is_null());
        assert!(json["volatility"].is_null());
        assert_eq!(json["current_price"], serde_json::json!(187.46));
    }

    #[test]
    fn test_error_entry_shape() {
        let err: AdvisorError = DataError::NoDataAvailable("ZZZZ".into()).into();
        let entry = SymbolReport::from_result("ZZZZ", &Err(err));
        assert!(!entry.is_success());
        assert_eq!(entry.symbol(), "ZZZZ");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["symbol"], "ZZZZ");
        assert_eq!(json["kind"], "data_unavailable");
        assert!(json["error"].as_str().unwrap().contains("ZZZZ"));
    }

    #[test]
    fn test_summary() {
        let err: AdvisorError = DataError::NoDataAvailable("ZZZZ".into()).into();
        let batch = BatchReport::new(
            Uuid::new_v4(),
            vec![
                SymbolReport::from_result("AAPL", &Ok(decision())),
                SymbolReport::from_result("ZZZZ", &Err(err)),
            ],
        );
        assert_eq!(batch.succeeded(), 1);
        assert_eq!(batch.failed(), 1);

        let summary = batch.summary();
        assert!(summary.contains("ADVISORY REPORT"));
        assert!(summary.contains("187.46"));
        assert!(summary.contains("Invest"));
        assert!(summary.contains("data_unavailable"));
        assert!(batch.to_json().unwrap().contains("\"batch_id\""));
    }
}
