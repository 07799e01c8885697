//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use fin_core::prelude::*;
//!
//! let series: Series<f64> = Series::new();
//! let table: CanonicalTable<f64> = CanonicalTable::empty();
//! assert!(series.is_empty() && table.is_empty());
//! ```

// Core types
pub use crate::dataframe::DataFrame;
pub use crate::num::FinFloat;
pub use crate::ohlcv::{Bar, CanonicalTable, Field};
pub use crate::raw::{CsvOptions, RawCell, RawColumn, RawIndex, RawTable};
pub use crate::series::{DatedSeries, Series};

// Normalization
pub use crate::normalize::{normalize, DropCounts, Normalizer, NormalizerConfig};

// Error types
pub use crate::error::{IndicatorError, NormalizeError, NormalizeResult, Result};

// Traits
pub use crate::traits::Indicator;

// Utility functions
pub use crate::utils::{
    ols_fit, pearson, quantile_sorted, rolling_mean, rolling_std, rolling_sum, rolling_variance,
};
