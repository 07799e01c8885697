//! # fin-insight
//!
//! Everything around the indicator engine that turns a price history into
//! something a person or a language model can read:
//!
//! - [`HeadlineMetrics`] - Last close, daily change, period extremes
//! - [`describe`] and [`DataSnapshot`] - Summary statistics and prompt-ready text
//! - [`AnalysisPrompt`] and [`HybridAnalyst`] - Ask several models one question
//! - [`FallbackNewsSearch`] - Company news from the first provider that answers
//! - [`SimilarityRanker`] - Rank texts by embedding similarity
//! - [`load_market_data`] - Fetch, normalise and validate a ticker's history
//!
//! Models, search providers, embedders and market-data sources are traits;
//! their transports live with the caller.
//!
//! ## Example
//!
//! ```rust
//! use fin_core::prelude::*;
//! use fin_insight::prelude::*;
//! # use chrono::{Days, NaiveDate};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let bars = [100.0, 102.0, 101.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &c)| Bar::new(start + Days::new(i as u64), c, c, c, c, 1_000.0));
//! let table = CanonicalTable::from_bars(bars).unwrap();
//!
//! let metrics = HeadlineMetrics::from_table(&table).unwrap();
//! assert_eq!(metrics.daily_change, -1.0);
//!
//! let snapshot = DataSnapshot::capture(&table, &SnapshotConfig::default());
//! let prompt = AnalysisPrompt::new(&snapshot, "How volatile is it?");
//! assert!(prompt.render().starts_with("You are a financial analyst."));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod analyst;
pub mod describe;
pub mod error;
pub mod market;
pub mod metrics;
pub mod news;
pub mod prelude;
pub mod prompt;
pub mod similarity;
pub mod snapshot;

pub use prelude::*;
