//! Prelude for fin-indicators.
//!
//! This module re-exports all commonly used types and traits.

// Engine
pub use crate::engine::{AnalysisReport, EngineConfig, IndicatorEngine, IndicatorOutcome};

// Trend indicators
pub use crate::trend::{MovingAverage, MovingAverageConfig, WindowPolicy};

// Volatility indicators
pub use crate::volatility::{BollingerBands, BollingerConfig, BollingerSeries};

// Momentum indicators
pub use crate::momentum::{Rsi, RsiConfig};

// Statistical summaries
pub use crate::stats::{
    Correlation, CorrelationConfig, CorrelationMatrix, Histogram, PriceDistribution,
    PriceDistributionConfig,
};

// Forecasts
pub use crate::forecast::{LinearTrend, LinearTrendConfig, TrendForecast};
