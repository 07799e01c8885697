//! Trend indicators.
//!
//! - Moving Average (short, shrinking window; long, strict window)

mod moving_average;

pub use moving_average::{MovingAverage, MovingAverageConfig, WindowPolicy};
