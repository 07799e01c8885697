//! Raw table to canonical table.
//!
//! The steps run in a fixed order:
//!
//! 1. absent or empty input is [`NormalizeError::NoData`]
//! 2. headers are flattened to their outermost level
//! 3. every OHLCV field must be present, else [`NormalizeError::MissingColumn`]
//! 4. dates come from the date column, or failing that the row index, else
//!    [`NormalizeError::MissingDate`]
//! 5. rows without a close are dropped
//! 6. rows with `close <= 0` are dropped
//! 7. rows with a negative or missing volume are dropped
//! 8. whatever remains is returned, possibly empty
//!
//! Rows whose date cannot be read are dropped as well, and are counted
//! separately in the log.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, NormalizeResult};
use crate::num::FinFloat;
use crate::ohlcv::{Bar, CanonicalTable, Field};
use crate::raw::{RawCell, RawTable};

/// Normalizer settings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizerConfig {
    /// Label of the date column (matched case-insensitively).
    pub date_column: String,
    /// Stable-sort rows by date.
    pub sort_by_date: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            date_column: "Date".to_string(),
            sort_by_date: true,
        }
    }
}

impl NormalizerConfig {
    /// Set the date column label.
    #[must_use]
    pub fn with_date_column(mut self, label: impl Into<String>) -> Self {
        self.date_column = label.into();
        self
    }

    /// Enable or disable sorting by date.
    #[must_use]
    pub fn with_sort_by_date(mut self, sort: bool) -> Self {
        self.sort_by_date = sort;
        self
    }
}

/// Rows removed by each filter, in step order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropCounts {
    /// Unreadable date.
    pub bad_date: usize,
    /// Missing close.
    pub missing_close: usize,
    /// Close not above zero.
    pub non_positive_close: usize,
    /// Volume negative or missing.
    pub invalid_volume: usize,
}

impl DropCounts {
    /// Total rows dropped.
    #[must_use]
    pub fn total(&self) -> usize {
        self.bad_date + self.missing_close + self.non_positive_close + self.invalid_volume
    }
}

/// Turns [`RawTable`]s into [`CanonicalTable`]s.
///
/// # Example
///
/// ```rust
/// use fin_core::{CsvOptions, Normalizer, RawTable};
///
/// let csv = "Date,Open,High,Low,Close,Volume\n\
///            2024-01-02,10,11,9,10.5,1000\n\
///            2024-01-03,10,11,9,-1,1000\n";
/// let raw = RawTable::from_csv_reader(csv.as_bytes(), &CsvOptions::default()).unwrap();
/// let table = Normalizer::default().normalize::<f64>(&raw).unwrap();
///
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

struct ColumnMap<'a> {
    fields: HashMap<Field, &'a [RawCell]>,
    date: Option<&'a [RawCell]>,
}

impl Normalizer {
    /// Create a normalizer.
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// The settings in use.
    #[must_use]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a raw table.
    ///
    /// # Errors
    ///
    /// [`NormalizeError::NoData`], [`NormalizeError::MissingColumn`] or
    /// [`NormalizeError::MissingDate`]. A table whose every row is filtered
    /// out is returned as `Ok` with zero rows.
    pub fn normalize<T: FinFloat>(&self, raw: &RawTable) -> NormalizeResult<CanonicalTable<T>> {
        self.normalize_with_counts(raw).map(|(table, _)| table)
    }

    /// Like [`Normalizer::normalize`], also reporting how many rows each
    /// filter removed.
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn normalize_with_counts<T: FinFloat>(
        &self,
        raw: &RawTable,
    ) -> NormalizeResult<(CanonicalTable<T>, DropCounts)> {
        if raw.is_empty() {
            return Err(NormalizeError::NoData);
        }

        let columns = self.flatten(raw);
        let mut field_cells: [&[RawCell]; 5] = [&[]; 5];
        for (slot, field) in field_cells.iter_mut().zip(Field::ALL) {
            *slot = columns
                .fields
                .get(&field)
                .copied()
                .ok_or_else(|| NormalizeError::MissingColumn(field.name().to_string()))?;
        }

        let dates = match (columns.date, raw.index()) {
            (Some(cells), _) => cells,
            (None, Some(index)) => index.cells(),
            (None, None) => return Err(NormalizeError::MissingDate),
        };

        let mut counts = DropCounts::default();
        let mut bars: Vec<Bar<T>> = Vec::with_capacity(raw.row_count());
        for row in 0..raw.row_count() {
            let Some(date) = dates.get(row).and_then(RawCell::as_date) else {
                counts.bad_date += 1;
                continue;
            };
            let [open, high, low, close, volume] =
                field_cells.map(|cells| number_at::<T>(cells, row));

            if close.is_nan() {
                counts.missing_close += 1;
            } else if close <= T::ZERO || close.is_infinite() {
                counts.non_positive_close += 1;
            } else if volume.is_nan() || volume < T::ZERO {
                counts.invalid_volume += 1;
            } else {
                bars.push(Bar::new(date, open, high, low, close, volume));
            }
        }

        if self.config.sort_by_date {
            bars.sort_by_key(|bar| bar.date);
        }

        if counts.total() > 0 {
            debug!(
                bad_date = counts.bad_date,
                missing_close = counts.missing_close,
                non_positive_close = counts.non_positive_close,
                invalid_volume = counts.invalid_volume,
                "Dropped rows during normalization"
            );
        }
        debug!(rows = bars.len(), "Normalized table");

        let table = CanonicalTable::from_bars(bars)?;
        Ok((table, counts))
    }

    fn flatten<'a>(&self, raw: &'a RawTable) -> ColumnMap<'a> {
        let mut fields = HashMap::new();
        let mut date = None;

        for column in raw.columns() {
            let label = column.label().trim();
            if let Some(field) = Field::from_header(label) {
                if fields.contains_key(&field) {
                    warn!(column = label, "Duplicate column after header flattening, keeping the first");
                } else {
                    fields.insert(field, column.cells());
                }
            } else if label.eq_ignore_ascii_case(self.config.date_column.trim()) && date.is_none() {
                date = Some(column.cells());
            }
        }

        ColumnMap { fields, date }
    }
}

fn number_at<T: FinFloat>(cells: &[RawCell], row: usize) -> T {
    cells
        .get(row)
        .and_then(RawCell::as_number)
        .map_or(T::NAN, T::from_f64_lossy)
}

/// Normalize with the default settings.
///
/// # Errors
///
/// See [`Normalizer::normalize`].
pub fn normalize<T: FinFloat>(raw: &RawTable) -> NormalizeResult<CanonicalTable<T>> {
    Normalizer::default().normalize(raw)
}

/// First and last date of a table, if it has rows.
#[must_use]
pub fn date_span<T: FinFloat>(table: &CanonicalTable<T>) -> Option<(NaiveDate, NaiveDate)> {
    Some((*table.dates().first()?, *table.dates().last()?))
}
