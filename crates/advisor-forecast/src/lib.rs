//! Sequence forecaster.
//!
//! A one-step-ahead model is trained on sliding windows of min-max scaled
//! closes, then rolled forward recursively: each prediction is appended to
//! the input window and the oldest value dropped. Errors compound over the
//! horizon.
//!
//! The confidence band is a fixed ±1% of each predicted price. It is a
//! display heuristic, not a statistical interval. The confidence score is
//! computed from the training-set fit, so it is optimistic.

pub mod dataset;
pub mod forecaster;
pub mod model;
pub mod scaler;

pub use dataset::WindowDataset;
pub use forecaster::{
    forecast, ChartPoint, ForecastConfig, ForecastResult, ForecastSummary, Forecaster, Trend,
    WindowState,
};
pub use model::{RidgeModel, SequenceModel};
pub use scaler::MinMaxScaler;
