//! Per-field summary statistics.

use core::fmt;

use fin_core::{num::FinFloat, ohlcv::CanonicalTable, ohlcv::Field, utils::quantile_sorted};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Descriptive statistics of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat"))]
pub struct FieldSummary<T: FinFloat> {
    /// Which field.
    pub field: Field,
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: T,
    /// Sample standard deviation, NaN below two values.
    pub std: T,
    /// Smallest value.
    pub min: T,
    /// First quartile.
    pub q25: T,
    /// Median.
    pub median: T,
    /// Third quartile.
    pub q75: T,
    /// Largest value.
    pub max: T,
}

impl<T: FinFloat> FieldSummary<T> {
    fn stat_rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean.to_f64_lossy()),
            ("std", self.std.to_f64_lossy()),
            ("min", self.min.to_f64_lossy()),
            ("25%", self.q25.to_f64_lossy()),
            ("50%", self.median.to_f64_lossy()),
            ("75%", self.q75.to_f64_lossy()),
            ("max", self.max.to_f64_lossy()),
        ]
    }
}

/// Summary statistics of every field of a table, in canonical field order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat"))]
pub struct Summary<T: FinFloat> {
    /// One entry per field.
    pub fields: Vec<FieldSummary<T>>,
}

impl<T: FinFloat> Summary<T> {
    /// Look up the statistics of one field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldSummary<T>> {
        self.fields.iter().find(|s| s.field == field)
    }
}

/// Compute count, mean, std, min, quartiles and max for each field.
///
/// Quartiles interpolate linearly between closest ranks. An empty table
/// yields count 0 and NaN everywhere else.
#[must_use]
pub fn describe<T: FinFloat>(table: &CanonicalTable<T>) -> Summary<T> {
    let fields = Field::ALL
        .iter()
        .map(|&field| {
            let series = table.field(field);
            let mut sorted: Vec<T> = series.valid().collect();
            sorted.sort_by(|a, b| a.total_cmp_fn(b));

            FieldSummary {
                field,
                count: sorted.len(),
                mean: series.mean(),
                std: series.std(),
                min: sorted.first().copied().unwrap_or(T::NAN),
                q25: quantile_sorted(&sorted, 0.25),
                median: quantile_sorted(&sorted, 0.5),
                q75: quantile_sorted(&sorted, 0.75),
                max: sorted.last().copied().unwrap_or(T::NAN),
            }
        })
        .collect();

    Summary { fields }
}

const LABEL_WIDTH: usize = 6;
const CELL_WIDTH: usize = 14;

impl<T: FinFloat> fmt::Display for Summary<T> {
    /// Statistics as rows, fields as columns.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:LABEL_WIDTH$}", "")?;
        for s in &self.fields {
            write!(f, "{:>CELL_WIDTH$}", s.field.name())?;
        }
        writeln!(f)?;

        let rows: Vec<_> = self.fields.iter().map(FieldSummary::stat_rows).collect();
        for stat in 0..8 {
            let label = rows.first().map_or("", |r| r[stat].0);
            write!(f, "{label:LABEL_WIDTH$}")?;
            for row in &rows {
                write!(f, "{:>CELL_WIDTH$.6}", row[stat].1)?;
            }
            if stat < 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Days, NaiveDate};
    use fin_core::ohlcv::Bar;

    fn create_test_table(closes: &[f64]) -> CanonicalTable<f64> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(start + Days::new(i as u64), c, c, c, c, 10.0));
        CanonicalTable::from_bars(bars).unwrap()
    }

    #[test]
    fn test_close_quartiles() {
        let summary = describe(&create_test_table(&[4.0, 1.0, 3.0, 2.0, 5.0]));
        let close = summary.get(Field::Close).unwrap();

        assert_eq!(close.count, 5);
        assert_relative_eq!(close.mean, 3.0);
        assert_relative_eq!(close.std, 2.5f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(close.min, 1.0);
        assert_relative_eq!(close.q25, 2.0);
        assert_relative_eq!(close.median, 3.0);
        assert_relative_eq!(close.q75, 4.0);
        assert_relative_eq!(close.max, 5.0);
    }

    #[test]
    fn test_interpolated_quartile() {
        let summary = describe(&create_test_table(&[1.0, 2.0, 3.0, 4.0]));
        let close = summary.get(Field::Close).unwrap();
        assert_relative_eq!(close.q25, 1.75);
        assert_relative_eq!(close.q75, 3.25);
    }

    #[test]
    fn test_empty_table() {
        let summary = describe(&CanonicalTable::<f64>::empty());
        assert_eq!(summary.fields.len(), 5);
        assert!(summary.fields.iter().all(|s| s.count == 0 && s.mean.is_nan()));
    }

    #[test]
    fn test_render_has_every_stat() {
        let text = describe(&create_test_table(&[1.0, 2.0])).to_string();
        for label in ["count", "mean", "std", "min", "25%", "50%", "75%", "max", "Volume"] {
            assert!(text.contains(label), "missing {label}");
        }
        assert_eq!(text.lines().count(), 9);
    }
}
