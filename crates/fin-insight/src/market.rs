//! Fetching and validating a ticker's price history.
//!
//! The source is a collaborator behind [`MarketDataSource`]. This module
//! owns the classification of what comes back into the three user-facing
//! refusals: no match, invalid data, too few rows.

use core::fmt;
use std::fs::File;
use std::path::PathBuf;

use chrono::NaiveDate;
use fin_core::{
    normalize::{DropCounts, Normalizer},
    num::FinFloat,
    ohlcv::CanonicalTable,
    raw::{CsvOptions, RawTable},
};
use tracing::{info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{InsightError, Result};

/// Rows needed before a history is worth analysing.
pub const MIN_ROWS: usize = 2;

/// A market symbol: trimmed, upper-case, non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Ticker(String);

impl Ticker {
    /// Normalise user input into a symbol.
    pub fn parse(input: &str) -> Result<Self> {
        let symbol = input.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(InsightError::InvalidTicker(input.to_string()));
        }
        Ok(Self(symbol))
    }

    /// The symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = InsightError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

/// What to fetch: a symbol and an optional `[start, end)` date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketDataRequest {
    /// Symbol.
    pub ticker: Ticker,
    /// First date included.
    pub start: Option<NaiveDate>,
    /// First date excluded.
    pub end: Option<NaiveDate>,
}

impl MarketDataRequest {
    /// Request the full history of `ticker`.
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            start: None,
            end: None,
        }
    }

    /// Restrict to `[start, end)`.
    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Whether `date` falls inside the requested range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date < e)
    }
}

/// Anything that can produce a raw price table for a request.
pub trait MarketDataSource {
    /// Fetch raw rows for `request`. An unknown symbol yields an empty table.
    fn fetch(&self, request: &MarketDataRequest) -> Result<RawTable>;
}

/// Reads one CSV file per request, ignoring the symbol.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvFileSource {
    /// Read `path` with `options`.
    pub fn new(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }
}

impl MarketDataSource for CsvFileSource {
    fn fetch(&self, _request: &MarketDataRequest) -> Result<RawTable> {
        let file = File::open(&self.path)
            .map_err(|e| InsightError::Source(format!("{}: {e}", self.path.display())))?;
        RawTable::from_csv_reader(file, &self.options).map_err(|e| InsightError::Source(e.to_string()))
    }
}

/// A validated history ready for the indicator engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketData<T: FinFloat> {
    /// Symbol the data belongs to.
    pub ticker: Ticker,
    /// Canonical rows inside the requested range.
    pub table: CanonicalTable<T>,
    /// Rows the normaliser discarded.
    pub dropped: DropCounts,
}

/// Fetch, normalise and range-check a history.
///
/// # Errors
///
/// - [`InsightError::NoTickerMatch`] when the source returns no rows
/// - [`InsightError::InvalidData`] when normalisation fails or keeps no rows
/// - [`InsightError::TooFewRows`] when fewer than [`MIN_ROWS`] rows fall in range
/// - [`InsightError::Source`] when the source itself fails
pub fn load_market_data<T, S>(
    source: &S,
    request: &MarketDataRequest,
    normalizer: &Normalizer,
) -> Result<MarketData<T>>
where
    T: FinFloat,
    S: MarketDataSource + ?Sized,
{
    let ticker = request.ticker.clone();
    let raw = source.fetch(request)?;
    if raw.is_empty() {
        warn!(%ticker, "source returned no rows");
        return Err(InsightError::NoTickerMatch {
            ticker: ticker.to_string(),
        });
    }

    let (table, dropped) = normalizer
        .normalize_with_counts::<T>(&raw)
        .map_err(|e| InsightError::InvalidData {
            ticker: ticker.to_string(),
            detail: e.to_string(),
        })?;
    if table.is_empty() {
        return Err(InsightError::InvalidData {
            ticker: ticker.to_string(),
            detail: format!("all {} rows were dropped", dropped.total()),
        });
    }

    let table = if request.start.is_some() || request.end.is_some() {
        CanonicalTable::from_bars(table.iter().filter(|bar| request.contains(bar.date))).map_err(|e| {
            InsightError::InvalidData {
                ticker: ticker.to_string(),
                detail: e.to_string(),
            }
        })?
    } else {
        table
    };

    if table.len() < MIN_ROWS {
        return Err(InsightError::TooFewRows { actual: table.len() });
    }

    info!(%ticker, rows = table.len(), dropped = dropped.total(), "market data loaded");
    Ok(MarketData {
        ticker,
        table,
        dropped,
    })
}
