//! Bollinger Bands indicator.
//!
//! Bollinger Bands are volatility bands placed above and below a moving average.

use chrono::NaiveDate;
use fin_core::{
    error::{IndicatorError, Result},
    num::FinFloat,
    ohlcv::CanonicalTable,
    series::Series,
    traits::Indicator,
    utils::{rolling_mean, rolling_std},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use core::marker::PhantomData;

/// Configuration for Bollinger Bands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BollingerConfig {
    /// The window size for the moving average (default: 20). Tables with
    /// fewer rows are refused.
    pub window: usize,
    /// Number of standard deviations for bands (default: 2.0).
    pub num_std: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            window: 20,
            num_std: 2.0,
        }
    }
}

impl BollingerConfig {
    /// Create a new Bollinger Bands configuration.
    pub fn new(window: usize, num_std: f64) -> Self {
        Self { window, num_std }
    }
}

/// Bollinger Bands, trimmed to the rows where a full window exists.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat"))]
pub struct BollingerSeries<T: FinFloat> {
    /// Dates of the defined points.
    pub dates: Vec<NaiveDate>,
    /// Upper band series.
    pub upper: Series<T>,
    /// Middle band series.
    pub middle: Series<T>,
    /// Lower band series.
    pub lower: Series<T>,
    /// Band width series.
    pub width: Series<T>,
    /// %B series.
    pub pct_b: Series<T>,
}

impl<T: FinFloat> BollingerSeries<T> {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// `true` if there are no points.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Bollinger Bands indicator.
///
/// # Formula
///
/// Middle = SMA(Close, n)
/// StdDev = sqrt(sum((Close - SMA)^2) / (n-1))  // Sample std (ddof=1)
/// Upper = Middle + k * StdDev
/// Lower = Middle - k * StdDev
/// Width = (Upper - Lower) / Middle  (if Middle=0 → NaN)
/// %B = (Close - Lower) / (Upper - Lower)  (if Upper=Lower → 0.5)
#[derive(Debug, Clone)]
pub struct BollingerBands<T: FinFloat> {
    config: BollingerConfig,
    _marker: PhantomData<T>,
}

impl<T: FinFloat> Indicator<T> for BollingerBands<T> {
    type Output = BollingerSeries<T>;
    type Config = BollingerConfig;

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    fn name(&self) -> &'static str {
        "bollinger_bands"
    }

    fn min_periods(&self) -> usize {
        self.config.window
    }

    fn calculate(&self, data: &CanonicalTable<T>) -> Result<Self::Output> {
        if self.config.window < 2 {
            return Err(IndicatorError::InvalidWindow(self.config.window));
        }
        if self.config.num_std.is_nan() || self.config.num_std <= 0.0 {
            return Err(IndicatorError::InvalidParameter {
                name: "num_std",
                value: self.config.num_std.to_string(),
                expected: "positive number",
            });
        }
        self.ensure_min_periods(data)?;

        let close = data.close().as_slice();
        let window = self.config.window.min(data.len());
        let k = T::from_f64_lossy(self.config.num_std);
        let epsilon = T::from_f64_lossy(1e-10);

        let means = rolling_mean(close, window);
        let stds = rolling_std(close, window, 1);

        let capacity = data.len() + 1 - window;
        let mut out = BollingerSeries {
            dates: Vec::with_capacity(capacity),
            upper: Series::with_capacity(capacity),
            middle: Series::with_capacity(capacity),
            lower: Series::with_capacity(capacity),
            width: Series::with_capacity(capacity),
            pct_b: Series::with_capacity(capacity),
        };

        for i in (window - 1)..data.len() {
            let mean = means[i];
            let std_dev = stds[i];
            if mean.is_nan() || std_dev.is_nan() {
                continue;
            }

            let u = mean + k * std_dev;
            let l = mean - k * std_dev;

            out.dates.push(data.dates()[i]);
            out.upper.push(u);
            out.middle.push(mean);
            out.lower.push(l);

            // Width
            out.width.push(if mean.abs() > epsilon {
                (u - l) / mean
            } else {
                T::NAN
            });

            // %B
            let band_range = u - l;
            out.pct_b.push(if band_range.abs() > epsilon {
                (close[i] - l) / band_range
            } else {
                T::HALF
            });
        }

        Ok(out)
    }
}
