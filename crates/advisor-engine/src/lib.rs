//! Per-symbol advisory pipeline and batch orchestration.
//!
//! [`Advisor`] turns one validated series into a decision report.
//! [`BatchRunner`] fetches data for many symbols with bounded concurrency,
//! per-call timeouts and cancellation, and returns one entry per requested
//! symbol with failures inline.

mod advisor;
mod batch;
mod report;

pub use advisor::Advisor;
pub use batch::{BatchRequest, BatchRunner};
pub use report::{
    AnalysisReport, BatchReport, ErrorReport, ForecastView, SimulationView, SymbolReport,
};
