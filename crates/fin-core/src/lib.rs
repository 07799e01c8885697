//! # fin-core
//!
//! Core types for the fin-analyst workspace.
//!
//! - [`FinFloat`] - Trait for numeric types (f32/f64)
//! - [`Series`] and [`DatedSeries`] - Value columns, optionally date-aligned
//! - [`Bar`] and [`CanonicalTable`] - Validated OHLCV price history
//! - [`RawTable`] - Untyped input with multi-level headers, readable from CSV
//! - [`Normalizer`] - Raw table to canonical table
//! - [`DataFrame`] - Named columns with deterministic ordering
//! - [`Indicator`] - Computation trait
//!
//! ## Feature Flags
//!
//! - `serde` (default) - Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```rust
//! use fin_core::prelude::*;
//!
//! let csv = "Date,Open,High,Low,Close,Volume\n\
//!            2024-01-02,10,11,9,10.5,1000\n\
//!            2024-01-03,10.5,12,10,11.5,1200\n";
//! let raw = RawTable::from_csv_reader(csv.as_bytes(), &CsvOptions::default()).unwrap();
//! let table: CanonicalTable<f64> = normalize(&raw).unwrap();
//!
//! let ma = rolling_mean(table.close().as_slice(), 2);
//! assert_eq!(ma.latest(), Some(11.0));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod dataframe;
pub mod error;
pub mod normalize;
pub mod num;
pub mod ohlcv;
pub mod prelude;
pub mod raw;
pub mod series;
pub mod traits;
pub mod utils;

// Re-export core types at crate root
pub use dataframe::DataFrame;
pub use error::{IndicatorError, NormalizeError, NormalizeResult, Result};
pub use normalize::{date_span, normalize, DropCounts, Normalizer, NormalizerConfig};
pub use num::FinFloat;
pub use ohlcv::{Bar, CanonicalTable, Field};
pub use raw::{CsvOptions, RawCell, RawColumn, RawIndex, RawTable};
pub use series::{DatedSeries, Series};
pub use traits::Indicator;
