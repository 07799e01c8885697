//! OHLCV bars and the canonical table.
//!
//! The [`CanonicalTable`] is the validated, date-ordered price history every
//! indicator reads. Its invariants are checked once, at construction, and the
//! table exposes no mutating methods afterwards.

use core::fmt;

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, NormalizeResult};
use crate::num::FinFloat;
use crate::series::Series;

/// One of the five numeric fields of a trading-period record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Field {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
}

impl Field {
    /// All fields in canonical column order.
    pub const ALL: [Field; 5] = [
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
        Field::Volume,
    ];

    /// Display name, as used in column headers.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::Volume => "Volume",
        }
    }

    /// Match a header label, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_header(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single dated OHLCV record.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use fin_core::Bar;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let bar = Bar::new(date, 100.0, 105.0, 98.0, 103.0, 1_000_000.0);
/// assert!(bar.is_canonical());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat"))]
pub struct Bar<T: FinFloat> {
    /// Trading date.
    pub date: NaiveDate,
    /// Opening price (may be NaN).
    pub open: T,
    /// Highest price (may be NaN).
    pub high: T,
    /// Lowest price (may be NaN).
    pub low: T,
    /// Closing price.
    pub close: T,
    /// Trading volume.
    pub volume: T,
}

impl<T: FinFloat> Bar<T> {
    /// Create a new bar.
    #[must_use]
    pub fn new(date: NaiveDate, open: T, high: T, low: T, close: T, volume: T) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Value of the given field.
    #[must_use]
    pub fn field(&self, field: Field) -> T {
        match field {
            Field::Open => self.open,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close,
            Field::Volume => self.volume,
        }
    }

    /// `true` when the bar satisfies the per-row table invariants:
    /// a finite close above zero and a non-negative volume.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.close_violation().is_none() && self.volume_violation().is_none()
    }

    fn close_violation(&self) -> Option<&'static str> {
        if !self.close.is_valid() {
            Some("close must be a finite number")
        } else if self.close <= T::ZERO {
            Some("close must be > 0")
        } else {
            None
        }
    }

    fn volume_violation(&self) -> Option<&'static str> {
        // NaN fails the comparison as well
        if self.volume >= T::ZERO {
            None
        } else {
            Some("volume must be >= 0")
        }
    }
}

/// Validated, date-ordered OHLCV table in columnar layout.
///
/// Invariants:
/// - dates are non-decreasing
/// - every close is finite and `> 0`
/// - every volume is `>= 0`
///
/// A table may be empty; that is a valid state, distinct from "no table".
///
/// With the `serde` feature the table is written as a list of bars and read
/// back through [`CanonicalTable::from_bars`], so a decoded table holds the
/// same invariants as a constructed one.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "Vec<Bar<T>>",
        into = "Vec<Bar<T>>",
        bound = "T: FinFloat"
    )
)]
pub struct CanonicalTable<T: FinFloat> {
    dates: Vec<NaiveDate>,
    open: Series<T>,
    high: Series<T>,
    low: Series<T>,
    close: Series<T>,
    volume: Series<T>,
}

impl<T: FinFloat> CanonicalTable<T> {
    /// An empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            open: Series::new(),
            high: Series::new(),
            low: Series::new(),
            close: Series::new(),
            volume: Series::new(),
        }
    }

    /// Build a table from bars, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidRow`] for the first bar that breaks an
    /// invariant, including a date earlier than its predecessor.
    pub fn from_bars<I>(bars: I) -> NormalizeResult<Self>
    where
        I: IntoIterator<Item = Bar<T>>,
    {
        let bars = bars.into_iter();
        let mut table = Self::with_capacity(bars.size_hint().0);

        for (row, bar) in bars.enumerate() {
            if let Some(reason) = bar.close_violation().or_else(|| bar.volume_violation()) {
                return Err(NormalizeError::InvalidRow { row, reason });
            }
            if table.dates.last().is_some_and(|&prev| bar.date < prev) {
                return Err(NormalizeError::InvalidRow {
                    row,
                    reason: "dates must be non-decreasing",
                });
            }
            table.push_unchecked(bar);
        }

        Ok(table)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            dates: Vec::with_capacity(capacity),
            open: Series::with_capacity(capacity),
            high: Series::with_capacity(capacity),
            low: Series::with_capacity(capacity),
            close: Series::with_capacity(capacity),
            volume: Series::with_capacity(capacity),
        }
    }

    fn push_unchecked(&mut self, bar: Bar<T>) {
        self.dates.push(bar.date);
        self.open.push(bar.open);
        self.high.push(bar.high);
        self.low.push(bar.low);
        self.close.push(bar.close);
        self.volume.push(bar.volume);
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Row dates.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Open prices.
    #[must_use]
    pub fn open(&self) -> &Series<T> {
        &self.open
    }

    /// High prices.
    #[must_use]
    pub fn high(&self) -> &Series<T> {
        &self.high
    }

    /// Low prices.
    #[must_use]
    pub fn low(&self) -> &Series<T> {
        &self.low
    }

    /// Close prices.
    #[must_use]
    pub fn close(&self) -> &Series<T> {
        &self.close
    }

    /// Volumes.
    #[must_use]
    pub fn volume(&self) -> &Series<T> {
        &self.volume
    }

    /// Column for the given field.
    #[must_use]
    pub fn field(&self, field: Field) -> &Series<T> {
        match field {
            Field::Open => &self.open,
            Field::High => &self.high,
            Field::Low => &self.low,
            Field::Close => &self.close,
            Field::Volume => &self.volume,
        }
    }

    /// The bar at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Bar<T>> {
        Some(Bar {
            date: *self.dates.get(index)?,
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
            volume: self.volume[index],
        })
    }

    /// The most recent bar.
    #[must_use]
    pub fn last(&self) -> Option<Bar<T>> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate over the rows as bars.
    pub fn iter(&self) -> impl Iterator<Item = Bar<T>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// A new table holding the last `n` rows.
    #[must_use]
    pub fn tail(&self, n: usize) -> Self {
        let start = self.len().saturating_sub(n);
        let mut table = Self::with_capacity(self.len() - start);
        for bar in self.iter().skip(start) {
            table.push_unchecked(bar);
        }
        table
    }
}

impl<T: FinFloat> TryFrom<Vec<Bar<T>>> for CanonicalTable<T> {
    type Error = NormalizeError;

    fn try_from(bars: Vec<Bar<T>>) -> NormalizeResult<Self> {
        Self::from_bars(bars)
    }
}

impl<T: FinFloat> From<CanonicalTable<T>> for Vec<Bar<T>> {
    fn from(table: CanonicalTable<T>) -> Self {
        table.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn bar(d: u32, close: f64, volume: f64) -> Bar<f64> {
        Bar::new(day(d), close, close + 1.0, close - 1.0, close, volume)
    }

    #[test]
    fn test_field_from_header() {
        assert_eq!(Field::from_header("Close"), Some(Field::Close));
        assert_eq!(Field::from_header("  volume "), Some(Field::Volume));
        assert_eq!(Field::from_header("ADJ CLOSE"), None);
        assert_eq!(Field::Open.to_string(), "Open");
    }

    #[test]
    fn test_bar_is_canonical() {
        assert!(bar(1, 10.0, 0.0).is_canonical());
        assert!(!bar(1, 0.0, 100.0).is_canonical());
        assert!(!bar(1, 10.0, -1.0).is_canonical());
        assert!(!bar(1, f64::NAN, 100.0).is_canonical());
        assert!(!bar(1, 10.0, f64::NAN).is_canonical());
    }

    #[test]
    fn test_from_bars_columnar_access() {
        let table = CanonicalTable::from_bars(vec![bar(1, 10.0, 100.0), bar(2, 11.0, 200.0)]).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.close().as_slice(), &[10.0, 11.0]);
        assert_eq!(table.field(Field::Volume).as_slice(), &[100.0, 200.0]);
        assert_eq!(table.dates(), &[day(1), day(2)]);
        assert_eq!(table.last().map(|b| b.close), Some(11.0));
    }

    #[test]
    fn test_from_bars_rejects_invalid_close() {
        let result = CanonicalTable::from_bars(vec![bar(1, 10.0, 100.0), bar(2, -5.0, 100.0)]);
        assert_eq!(
            result,
            Err(NormalizeError::InvalidRow {
                row: 1,
                reason: "close must be > 0"
            })
        );
    }

    #[test]
    fn test_from_bars_rejects_unordered_dates() {
        let result = CanonicalTable::from_bars(vec![bar(3, 10.0, 100.0), bar(2, 11.0, 100.0)]);
        assert!(matches!(
            result,
            Err(NormalizeError::InvalidRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_equal_dates_allowed() {
        let table = CanonicalTable::from_bars(vec![bar(2, 10.0, 1.0), bar(2, 11.0, 1.0)]);
        assert!(table.is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_as_bars() {
        let table = CanonicalTable::from_bars(vec![bar(1, 10.0, 100.0), bar(2, 11.0, 0.0)]).unwrap();
        let json = serde_json::to_value(&table).unwrap();

        assert_eq!(json[1]["date"], "2024-01-02");
        assert_eq!(json[1]["close"], 11.0);
        let back: CanonicalTable<f64> = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_invariants() {
        let row = |date: &str, close: f64, volume: f64| {
            format!(
                r#"{{"date":"{date}","open":1.0,"high":1.0,"low":1.0,"close":{close},"volume":{volume}}}"#
            )
        };
        let negative_close = format!("[{}]", row("2024-01-01", -5.0, 1.0));
        let negative_volume = format!("[{}]", row("2024-01-01", 5.0, -1.0));
        let unordered = format!("[{},{}]", row("2024-01-02", 5.0, 1.0), row("2024-01-01", 5.0, 1.0));

        for json in [negative_close, negative_volume, unordered] {
            let err = serde_json::from_str::<CanonicalTable<f64>>(&json).unwrap_err();
            assert!(err.to_string().starts_with("Invalid row"), "{err}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_ragged_columns() {
        let dates: Vec<String> = (1..=20).map(|d| format!("\"2024-01-{d:02}\"")).collect();
        let json = format!(
            r#"{{"dates":[{}],"open":[1.0],"high":[1.0],"low":[1.0],"close":[-5.0],"volume":[-1.0]}}"#,
            dates.join(",")
        );
        assert!(serde_json::from_str::<CanonicalTable<f64>>(&json).is_err());
    }

    #[test]
    fn test_tail() {
        let table = CanonicalTable::from_bars((1..=5).map(|d| bar(d, d as f64, 1.0))).unwrap();
        let tail = table.tail(2);

        assert_eq!(tail.len(), 2);
        assert_eq!(tail.close().as_slice(), &[4.0, 5.0]);
        assert_eq!(table.tail(10).len(), 5);
    }

    #[test]
    fn test_empty_table() {
        let table: CanonicalTable<f64> = CanonicalTable::empty();
        assert!(table.is_empty());
        assert!(table.last().is_none());
        assert_eq!(table.iter().count(), 0);
    }
}
