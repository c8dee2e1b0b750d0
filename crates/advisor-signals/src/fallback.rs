//! Batch-level fallback promotion.
//!
//! When every report in a multi-symbol batch is "Avoid", the highest-scoring
//! one is promoted to "Review further" provided its score reaches the
//! configured minimum. Ties go to the earliest symbol.

use crate::decision::{DecisionReport, FinalDecision};

/// Index of the report to promote, if the rule applies.
///
/// The caller decides whether the batch counts as multi-symbol; this only
/// looks at the reports it is given.
pub fn select_fallback(reports: &[&DecisionReport], min_score: u32) -> Option<usize> {
    if reports.is_empty()
        || !reports
            .iter()
            .all(|r| r.final_decision == FinalDecision::Avoid)
    {
        return None;
    }

    let mut best: Option<(usize, u32)> = None;
    for (i, report) in reports.iter().enumerate() {
        if best.map_or(true, |(_, score)| report.combined_score > score) {
            best = Some((i, report.combined_score));
        }
    }

    best.filter(|(_, score)| *score >= min_score).map(|(i, _)| i)
}

/// Apply the fallback to a whole batch of reports.
///
/// Single-report batches are returned unchanged.
pub fn apply_batch_fallback(reports: Vec<DecisionReport>, min_score: u32) -> Vec<DecisionReport> {
    if reports.len() < 2 {
        return reports;
    }
    let selected = {
        let refs: Vec<&DecisionReport> = reports.iter().collect();
        select_fallback(&refs, min_score)
    };
    match selected {
        Some(idx) => reports
            .into_iter()
            .enumerate()
            .map(|(i, r)| if i == idx { r.promoted() } else { r })
            .collect(),
        None => reports,
    }
}
