//! Linear-trend forecast of the next close.

use chrono::{Days, NaiveDate};
use fin_core::{
    error::{IndicatorError, Result},
    num::FinFloat,
    ohlcv::CanonicalTable,
    traits::Indicator,
    utils::ols_fit,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use core::marker::PhantomData;

/// Configuration for the linear-trend forecast.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinearTrendConfig {
    /// Rows past the last one to forecast (default: 1).
    pub steps_ahead: usize,
}

impl Default for LinearTrendConfig {
    fn default() -> Self {
        Self { steps_ahead: 1 }
    }
}

impl LinearTrendConfig {
    /// Set the forecast horizon.
    pub fn with_steps_ahead(mut self, steps: usize) -> Self {
        self.steps_ahead = steps;
        self
    }
}

/// A fitted line and its value past the end of the table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat"))]
pub struct TrendForecast<T: FinFloat> {
    /// Close change per row.
    pub slope: T,
    /// Fitted close at row 0.
    pub intercept: T,
    /// Row index the forecast is for.
    pub next_index: usize,
    /// Forecast close.
    pub predicted: T,
    /// Calendar date of the forecast (last date plus `steps_ahead` days).
    pub next_date: NaiveDate,
}

/// Ordinary least squares of close against the zero-based row index,
/// evaluated one step past the last row.
///
/// # Example
///
/// ```rust
/// use fin_indicators::prelude::*;
/// use fin_core::prelude::*;
/// # use chrono::{Days, NaiveDate};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bars = [10.0, 12.0, 14.0, 16.0, 18.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &c)| Bar::new(start + Days::new(i as u64), c, c, c, c, 1.0));
/// let table = CanonicalTable::from_bars(bars).unwrap();
///
/// let forecast = LinearTrend::<f64>::new(LinearTrendConfig::default())
///     .calculate(&table)
///     .unwrap();
/// assert!((forecast.predicted - 20.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct LinearTrend<T: FinFloat> {
    config: LinearTrendConfig,
    _marker: PhantomData<T>,
}

impl<T: FinFloat> Indicator<T> for LinearTrend<T> {
    type Output = TrendForecast<T>;
    type Config = LinearTrendConfig;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    fn name(&self) -> &'static str {
        "linear_trend"
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn calculate(&self, data: &CanonicalTable<T>) -> Result<Self::Output> {
        if self.config.steps_ahead == 0 {
            return Err(IndicatorError::InvalidParameter {
                name: "steps_ahead",
                value: "0".to_string(),
                expected: "at least 1",
            });
        }
        self.ensure_min_periods(data)?;

        let n = data.len();
        let x: Vec<T> = (0..n).map(<T as FinFloat>::from_usize).collect();
        let (slope, intercept) = ols_fit(&x, data.close().as_slice())
            .ok_or_else(|| IndicatorError::ComputationFault("degenerate least-squares fit".to_string()))?;

        let next_index = n - 1 + self.config.steps_ahead;
        let predicted = intercept + slope * <T as FinFloat>::from_usize(next_index);
        if !predicted.is_valid() {
            return Err(IndicatorError::ComputationFault(
                "forecast is not a finite number".to_string(),
            ));
        }

        let last = data.dates()[n - 1];
        let next_date = last
            .checked_add_days(Days::new(self.config.steps_ahead as u64))
            .ok_or_else(|| IndicatorError::ComputationFault("forecast date out of range".to_string()))?;

        Ok(TrendForecast {
            slope,
            intercept,
            next_index,
            predicted,
            next_date,
        })
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}
