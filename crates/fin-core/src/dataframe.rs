//! Named numeric columns with deterministic ordering.
//!
//! [`DataFrame`] is the column-set view used by computations that work over
//! "whichever fields are present" (correlation, summary statistics). It keeps
//! columns in insertion order through `IndexMap`, so matrices and reports come
//! out in the same order on every run.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::num::FinFloat;
use crate::ohlcv::{CanonicalTable, Field};
use crate::series::Series;

/// A set of equally long numeric columns in insertion order.
///
/// # Example
///
/// ```rust
/// use fin_core::{DataFrame, Series};
///
/// let mut df: DataFrame<f64> = DataFrame::new();
/// df.add_column("Close", Series::from_vec(vec![100.0, 101.0, 102.0])).unwrap();
/// df.add_column("Volume", Series::from_vec(vec![1000.0, 1100.0, 1200.0])).unwrap();
///
/// assert_eq!(df.len(), 3);
/// assert_eq!(df.column_names(), vec!["Close", "Volume"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat"))]
pub struct DataFrame<T: FinFloat> {
    columns: IndexMap<String, Series<T>>,
}

impl<T: FinFloat> Default for DataFrame<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FinFloat> DataFrame<T> {
    /// Create a new empty DataFrame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
        }
    }

    /// The five OHLCV columns of a canonical table, in field order.
    #[must_use]
    pub fn from_table(table: &CanonicalTable<T>) -> Self {
        Self::from_fields(table, &Field::ALL)
    }

    /// A subset of a canonical table's fields, in the order given.
    #[must_use]
    pub fn from_fields(table: &CanonicalTable<T>, fields: &[Field]) -> Self {
        let columns = fields
            .iter()
            .map(|&field| (field.name().to_string(), table.field(field).clone()))
            .collect();
        Self { columns }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Series::len)
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column names in insertion order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Get a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Series<T>> {
        self.columns.get(name)
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the length differs from the
    /// existing columns.
    pub fn add_column(&mut self, name: impl Into<String>, series: Series<T>) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(IndicatorError::InvalidParameter {
                name: "column_name",
                value: name,
                expected: "unique column name",
            });
        }

        if !self.columns.is_empty() && series.len() != self.len() {
            return Err(IndicatorError::LengthMismatch {
                expected: self.len(),
                actual: series.len(),
            });
        }

        self.columns.insert(name, series);
        Ok(())
    }

    /// Remove and return a column, keeping the order of the others.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::MissingColumn`] if the column doesn't exist.
    pub fn drop_column(&mut self, name: &str) -> Result<Series<T>> {
        self.columns
            .shift_remove(name)
            .ok_or_else(|| IndicatorError::MissingColumn(name.to_string()))
    }

    /// Returns an iterator over `(name, series)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series<T>)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ohlcv::Bar;
    use chrono::NaiveDate;

    fn table() -> CanonicalTable<f64> {
        let bars = (1..=3).map(|d| {
            let date = NaiveDate::from_ymd_opt(2024, 2, d).unwrap();
            let c = f64::from(d) * 10.0;
            Bar::new(date, c - 1.0, c + 1.0, c - 2.0, c, 100.0 * f64::from(d))
        });
        CanonicalTable::from_bars(bars).unwrap()
    }

    #[test]
    fn test_from_table_order() {
        let df = DataFrame::from_table(&table());
        assert_eq!(df.column_names(), vec!["Open", "High", "Low", "Close", "Volume"]);
        assert_eq!(df.len(), 3);
        assert_eq!(df.get_column("Close").unwrap().as_slice(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_from_fields_subset() {
        let df = DataFrame::from_fields(&table(), &[Field::Close, Field::Open]);
        assert_eq!(df.column_names(), vec!["Close", "Open"]);
    }

    #[test]
    fn test_add_column_length_mismatch() {
        let mut df: DataFrame<f64> = DataFrame::new();
        df.add_column("a", Series::from_vec(vec![1.0, 2.0])).unwrap();

        let result = df.add_column("b", Series::from_vec(vec![1.0]));
        assert!(matches!(result, Err(IndicatorError::LengthMismatch { .. })));
    }

    #[test]
    fn test_add_duplicate_column() {
        let mut df: DataFrame<f64> = DataFrame::new();
        df.add_column("a", Series::from_vec(vec![1.0])).unwrap();
        assert!(df.add_column("a", Series::from_vec(vec![2.0])).is_err());
    }

    #[test]
    fn test_drop_column_keeps_order() {
        let mut df = DataFrame::from_table(&table());
        let volume = df.drop_column("Volume").unwrap();

        assert_eq!(volume.len(), 3);
        assert_eq!(df.column_names(), vec!["Open", "High", "Low", "Close"]);
        assert!(matches!(
            df.drop_column("Volume"),
            Err(IndicatorError::MissingColumn(_))
        ));
    }
}
