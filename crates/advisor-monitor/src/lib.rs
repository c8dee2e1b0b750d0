//! Logging setup for the advisory engine.

mod logging;

pub use logging::{build_filter, setup_logging, LogGuard};
