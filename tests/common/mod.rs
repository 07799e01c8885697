//! Shared helpers for the workspace integration tests.
//!
//! Synthetic price histories, and CSV text in the layouts the report reads.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use fin_core::RawTable;
use fin_insight::{InsightError, MarketDataRequest, MarketDataSource};

/// First date of every synthetic history.
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

// ============================================================================
// Synthetic Data Generators
// ============================================================================

/// Generate linear price series.
pub fn generate_linear(start: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}

/// Generate random walk price series with deterministic seed.
pub fn generate_random_walk(start: f64, volatility: f64, len: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state as f64 / u64::MAX as f64) * 2.0 - 1.0
    };

    let mut prices = Vec::with_capacity(len);
    let mut last = start;
    for _ in 0..len {
        prices.push(last);
        last = (last + next() * volatility).max(0.01);
    }
    prices
}

// ============================================================================
// CSV Builders
// ============================================================================

fn row_values(close: f64, i: usize) -> [f64; 5] {
    [close * 0.995, close * 1.01, close * 0.985, close, 1_000.0 + 10.0 * i as f64]
}

/// Single-header CSV with one row per close on consecutive days.
pub fn flat_csv(closes: &[f64]) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Volume\n");
    for (i, &close) in closes.iter().enumerate() {
        let [o, h, l, c, v] = row_values(close, i);
        let date = start_date() + Days::new(i as u64);
        out.push_str(&format!("{date},{o},{h},{l},{c},{v}\n"));
    }
    out
}

/// Three-header CSV as written by common downloaders: a field row, a
/// ticker row, an index-name row, then the dates in the first column.
/// Columns come in `Close,High,Low,Open,Volume` order.
pub fn multi_header_csv(ticker: &str, closes: &[f64]) -> String {
    let mut out = String::from("Price,Close,High,Low,Open,Volume\n");
    out.push_str(&format!("Ticker,{ticker},{ticker},{ticker},{ticker},{ticker}\n"));
    out.push_str("Date,,,,,\n");
    for (i, &close) in closes.iter().enumerate() {
        let [o, h, l, c, v] = row_values(close, i);
        let date = start_date() + Days::new(i as u64);
        out.push_str(&format!("{date},{c},{h},{l},{o},{v}\n"));
    }
    out
}

/// Write `contents` to a fresh file under the system temp directory.
pub fn write_temp(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fin-analyst-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Collaborators
// ============================================================================

/// A source that hands out one fixed raw table.
pub struct FixedSource(pub RawTable);

impl MarketDataSource for FixedSource {
    fn fetch(&self, _request: &MarketDataRequest) -> Result<RawTable, InsightError> {
        Ok(self.0.clone())
    }
}
