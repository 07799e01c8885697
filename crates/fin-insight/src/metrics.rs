//! Headline figures for a price history.

use chrono::NaiveDate;
use fin_core::{num::FinFloat, ohlcv::CanonicalTable, series::Series};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{InsightError, Result};

/// Trading days in a year, the lookback for [`HeadlineMetrics::high_52w`].
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Summary numbers shown above any indicator output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat"))]
pub struct HeadlineMetrics<T: FinFloat> {
    /// Date of the last row.
    pub as_of: NaiveDate,
    /// Last close.
    pub last_close: T,
    /// Highest high over the whole table.
    pub period_high: T,
    /// Lowest low over the whole table.
    pub period_low: T,
    /// Last close minus the previous close.
    pub daily_change: T,
    /// `daily_change` as a percentage of the previous close.
    pub daily_change_pct: T,
    /// Mean volume over the whole table.
    pub average_volume: T,
    /// Highest high over the trailing [`TRADING_DAYS_PER_YEAR`] rows.
    pub high_52w: T,
}

impl<T: FinFloat> HeadlineMetrics<T> {
    /// Compute the metrics. Needs at least two rows for the daily change.
    pub fn from_table(table: &CanonicalTable<T>) -> Result<Self> {
        let n = table.len();
        if n < 2 {
            return Err(InsightError::TooFewRows { actual: n });
        }

        let close = table.close();
        let previous = close[n - 2];
        let last_close = close.latest().ok_or(InsightError::TooFewRows { actual: n })?;
        let daily_change = last_close - previous;

        let trailing = Series::from_vec(table.high().tail(TRADING_DAYS_PER_YEAR).to_vec());

        Ok(Self {
            as_of: table.dates()[n - 1],
            last_close,
            period_high: table.high().max().unwrap_or(T::NAN),
            period_low: table.low().min().unwrap_or(T::NAN),
            daily_change,
            daily_change_pct: daily_change / previous * T::HUNDRED,
            average_volume: table.volume().mean(),
            high_52w: trailing.max().unwrap_or(T::NAN),
        })
    }

    /// Whether the last close is above the previous one.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.daily_change > T::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Days;
    use fin_core::ohlcv::Bar;

    fn create_test_table(closes: &[f64]) -> CanonicalTable<f64> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes.iter().enumerate().map(|(i, &c)| {
            Bar::new(start + Days::new(i as u64), c, c + 1.0, c - 1.0, c, 100.0 * (i + 1) as f64)
        });
        CanonicalTable::from_bars(bars).unwrap()
    }

    #[test]
    fn test_basic_metrics() {
        let m = HeadlineMetrics::from_table(&create_test_table(&[10.0, 12.0, 11.0, 15.0])).unwrap();

        assert_relative_eq!(m.last_close, 15.0);
        assert_relative_eq!(m.period_high, 16.0);
        assert_relative_eq!(m.period_low, 9.0);
        assert_relative_eq!(m.daily_change, 4.0);
        assert_relative_eq!(m.daily_change_pct, 4.0 / 11.0 * 100.0, epsilon = 1e-12);
        assert_relative_eq!(m.average_volume, 250.0);
        assert_relative_eq!(m.high_52w, 16.0);
        assert_eq!(m.as_of, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        assert!(m.is_up());
    }

    #[test]
    fn test_52w_high_uses_trailing_rows() {
        let mut closes = vec![500.0];
        closes.extend((0..TRADING_DAYS_PER_YEAR).map(|i| 100.0 + (i % 7) as f64));
        let m = HeadlineMetrics::from_table(&create_test_table(&closes)).unwrap();

        assert_relative_eq!(m.period_high, 501.0);
        assert_relative_eq!(m.high_52w, 107.0);
    }

    #[test]
    fn test_single_row_refused() {
        assert_eq!(
            HeadlineMetrics::from_table(&create_test_table(&[10.0])),
            Err(InsightError::TooFewRows { actual: 1 })
        );
    }
}
