//! Simple moving average of close.
//!
//! Two window policies exist side by side. The short average shrinks its
//! window to the table length and is always computable; the long average
//! keeps its full window and is refused on shorter tables.

use fin_core::{
    error::{IndicatorError, Result},
    num::FinFloat,
    ohlcv::CanonicalTable,
    series::DatedSeries,
    traits::Indicator,
    utils::rolling_mean,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use core::marker::PhantomData;

/// What to do when the table is shorter than the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WindowPolicy {
    /// Use `min(window, rows)`.
    #[default]
    Shrink,
    /// Refuse with [`IndicatorError::InsufficientSamples`].
    Strict,
}

/// Configuration for a moving average.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovingAverageConfig {
    /// The window size (default: 20).
    pub window: usize,
    /// Short-table policy (default: shrink).
    pub policy: WindowPolicy,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self::short()
    }
}

impl MovingAverageConfig {
    /// Create a new configuration.
    pub fn new(window: usize, policy: WindowPolicy) -> Self {
        Self { window, policy }
    }

    /// The 20-row average with a shrinking window.
    pub fn short() -> Self {
        Self::new(20, WindowPolicy::Shrink)
    }

    /// The 50-row average, omitted below 50 rows.
    pub fn long() -> Self {
        Self::new(50, WindowPolicy::Strict)
    }

    /// Set the window size.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Window actually used for a table of `rows` rows.
    pub fn effective_window(&self, rows: usize) -> usize {
        match self.policy {
            WindowPolicy::Shrink => self.window.min(rows),
            WindowPolicy::Strict => self.window,
        }
    }
}

/// Simple moving average of close prices.
///
/// The output is aligned with the table: the first `window - 1` positions are
/// NaN.
///
/// # Example
///
/// ```rust
/// use fin_indicators::prelude::*;
/// use fin_core::prelude::*;
/// # use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bars = (0..5u32).map(|i| {
///     let c = 10.0 + f64::from(i);
///     Bar::new(start + chrono::Days::new(u64::from(i)), c, c, c, c, 100.0)
/// });
/// let table = CanonicalTable::from_bars(bars).unwrap();
///
/// // 5 rows: the 20-row average shrinks to a 5-row window
/// let ma = MovingAverage::<f64>::new(MovingAverageConfig::short());
/// let result = ma.calculate(&table).unwrap();
/// assert_eq!(result.latest().map(|(_, v)| v), Some(12.0));
/// ```
#[derive(Debug, Clone)]
pub struct MovingAverage<T: FinFloat> {
    config: MovingAverageConfig,
    _marker: PhantomData<T>,
}

impl<T: FinFloat> Indicator<T> for MovingAverage<T> {
    type Output = DatedSeries<T>;
    type Config = MovingAverageConfig;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    fn name(&self) -> &'static str {
        match self.config.policy {
            WindowPolicy::Shrink => "moving_average_short",
            WindowPolicy::Strict => "moving_average_long",
        }
    }

    fn min_periods(&self) -> usize {
        match self.config.policy {
            WindowPolicy::Shrink => 1,
            WindowPolicy::Strict => self.config.window,
        }
    }

    fn calculate(&self, data: &CanonicalTable<T>) -> Result<Self::Output> {
        if self.config.window == 0 {
            return Err(IndicatorError::InvalidWindow(0));
        }
        self.ensure_min_periods(data)?;

        let window = self.config.effective_window(data.len());
        let values = rolling_mean(data.close().as_slice(), window);
        DatedSeries::new(data.dates().to_vec(), values)
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}
