//! Plain-text rendering of a table for language-model prompts.

use core::fmt::Write as _;

use fin_core::{num::FinFloat, ohlcv::CanonicalTable, ohlcv::Field};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::describe::describe;

/// How much of the table the snapshot shows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapshotConfig {
    /// Trailing rows rendered verbatim (default: 10).
    pub recent_rows: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self { recent_rows: 10 }
    }
}

impl SnapshotConfig {
    /// Create a config with the given number of trailing rows.
    pub fn new(recent_rows: usize) -> Self {
        Self { recent_rows }
    }
}

/// The recent rows and the summary table, both as text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataSnapshot {
    /// Trailing rows, one line each, with a header line.
    pub recent: String,
    /// Output of [`describe`] rendered as a table.
    pub stats: String,
}

impl DataSnapshot {
    /// Render `table` under `config`.
    pub fn capture<T: FinFloat>(table: &CanonicalTable<T>, config: &SnapshotConfig) -> Self {
        Self {
            recent: render_rows(&table.tail(config.recent_rows)),
            stats: describe(table).to_string(),
        }
    }
}

fn render_rows<T: FinFloat>(table: &CanonicalTable<T>) -> String {
    let mut out = format!("{:<10}", "Date");
    for field in Field::ALL {
        let _ = write!(out, "{:>14}", field.name());
    }

    for bar in table.iter() {
        let _ = write!(out, "\n{}", bar.date.format("%Y-%m-%d"));
        for field in Field::ALL {
            let _ = write!(out, "{:>14.4}", bar.field(field).to_f64_lossy());
        }
    }
    out
}
