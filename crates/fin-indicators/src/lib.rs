//! # fin-indicators
//!
//! Indicators over a [`CanonicalTable`](fin_core::CanonicalTable), grouped by
//! kind:
//!
//! - **Trend**: short and long moving averages
//! - **Volatility**: Bollinger Bands
//! - **Momentum**: RSI
//! - **Stats**: correlation matrix, price distribution
//! - **Forecast**: linear trend
//!
//! Every indicator enforces its own row floor and is run by the
//! [`IndicatorEngine`], which tags each result as ready, unavailable or
//! faulted.
//!
//! ## Feature Flags
//!
//! - `serde` (default) - Serializable configs and outputs
//! - `parallel` - [`IndicatorEngine::run_parallel`] on the rayon pool
//!
//! # Example
//!
//! ```
//! use fin_indicators::prelude::*;
//! use fin_core::prelude::*;
//!
//! let csv = "Date,Open,High,Low,Close,Volume\n\
//!            2024-01-02,10,11,9,10,100\n\
//!            2024-01-03,10,13,10,12,100\n\
//!            2024-01-04,12,15,12,14,100\n";
//! let raw = RawTable::from_csv_reader(csv.as_bytes(), &CsvOptions::default()).unwrap();
//! let table: CanonicalTable<f64> = normalize(&raw).unwrap();
//!
//! let report = IndicatorEngine::default().run(&table);
//! let forecast = report.forecast.value().unwrap();
//! assert!((forecast.predicted - 16.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod engine;
pub mod forecast;
pub mod momentum;
pub mod stats;
pub mod trend;
pub mod volatility;

pub mod prelude;

pub use prelude::*;
