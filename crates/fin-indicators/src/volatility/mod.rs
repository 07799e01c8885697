//! Volatility indicators.
//!
//! - Bollinger Bands

mod bollinger;

pub use bollinger::{BollingerBands, BollingerConfig, BollingerSeries};
