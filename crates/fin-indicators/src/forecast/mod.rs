//! Forecasts.
//!
//! - Linear trend (least squares on the row index)

mod linear_trend;

pub use linear_trend::{LinearTrend, LinearTrendConfig, TrendForecast};
