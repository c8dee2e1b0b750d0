//! Core types and traits for the advisory engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, RawBar, PriceSeries)
//! - Lookup windows (Period, Interval)
//! - Sentiment signals supplied by external collaborators
//! - Core traits for indicators, market data and sentiment providers

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AdvisorError, AdvisorResult, ErrorKind};
pub use traits::*;
pub use types::*;
