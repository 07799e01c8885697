//! Relative Strength Index (RSI) indicator.
//!
//! RSI is a momentum oscillator that measures the speed and magnitude
//! of recent price changes to evaluate overbought or oversold conditions.

use fin_core::{
    error::{IndicatorError, Result},
    num::FinFloat,
    ohlcv::CanonicalTable,
    series::{DatedSeries, Series},
    traits::Indicator,
    utils::rolling_mean,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use core::marker::PhantomData;

/// Configuration for the RSI indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RsiConfig {
    /// The lookback period (default: 14).
    pub window: usize,
    /// Stand-in for a non-positive average loss (default: 0.0001).
    pub loss_epsilon: f64,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            window: 14,
            loss_epsilon: 0.0001,
        }
    }
}

impl RsiConfig {
    /// Create a new RSI configuration with the given window.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    /// Set the average-loss stand-in.
    pub fn with_loss_epsilon(mut self, epsilon: f64) -> Self {
        self.loss_epsilon = epsilon;
        self
    }
}

/// Relative Strength Index.
///
/// # Formula
///
/// ```text
/// Gain = max(Close[t] - Close[t-1], 0), 0 for the first row
/// Loss = max(Close[t-1] - Close[t], 0), 0 for the first row
/// AvgGain = SMA(Gain, n)
/// AvgLoss = SMA(Loss, n), replaced by epsilon when <= 0
/// RSI = 100 - 100 / (1 + AvgGain / AvgLoss)
/// ```
///
/// Averages are simple trailing means, not Wilder smoothing. The output keeps
/// only defined points, so a table of exactly `n` rows yields one value.
#[derive(Debug, Clone)]
pub struct Rsi<T: FinFloat> {
    config: RsiConfig,
    _marker: PhantomData<T>,
}

impl<T: FinFloat> Rsi<T> {
    /// RSI from average gain and loss.
    #[inline]
    fn compute_rsi(avg_gain: T, avg_loss: T, epsilon: T) -> T {
        let avg_loss = if avg_loss > T::ZERO { avg_loss } else { epsilon };
        let rs = avg_gain / avg_loss;
        T::HUNDRED - T::HUNDRED / (T::ONE + rs)
    }
}

impl<T: FinFloat> Indicator<T> for Rsi<T> {
    type Output = DatedSeries<T>;
    type Config = RsiConfig;

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
        "rsi"
    }

    fn min_periods(&self) -> usize {
        self.config.window
    }

    fn calculate(&self, data: &CanonicalTable<T>) -> Result<Self::Output> {
        let window = self.config.window;
        if window == 0 {
            return Err(IndicatorError::InvalidWindow(0));
        }
        if self.config.loss_epsilon.is_nan() || self.config.loss_epsilon <= 0.0 {
            return Err(IndicatorError::InvalidParameter {
                name: "loss_epsilon",
                value: self.config.loss_epsilon.to_string(),
                expected: "positive number",
            });
        }
        self.ensure_min_periods(data)?;

        let changes = data.close().diff();
        let mut gains = Vec::with_capacity(changes.len());
        let mut losses = Vec::with_capacity(changes.len());

        for &change in &changes {
            // The first change is NaN and counts as neither gain nor loss.
            if change > T::ZERO {
                gains.push(change);
                losses.push(T::ZERO);
            } else if change < T::ZERO {
                gains.push(T::ZERO);
                losses.push(-change);
            } else {
                gains.push(T::ZERO);
                losses.push(T::ZERO);
            }
        }

        let avg_gain = rolling_mean(&gains, window);
        let avg_loss = rolling_mean(&losses, window);
        let epsilon = T::from_f64_lossy(self.config.loss_epsilon);

        let values: Series<T> = avg_gain
            .iter()
            .zip(avg_loss.iter())
            .map(|(&g, &l)| {
                if g.is_nan() || l.is_nan() {
                    T::NAN
                } else {
                    Self::compute_rsi(g, l, epsilon)
                }
            })
            .collect();

        Ok(DatedSeries::new(data.dates().to_vec(), values)?.dropna())
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
        let bars = closes.iter().enumerate().map(|(i, &close)| {
            Bar::new(start + Days::new(i as u64), close, close, close, close, 1000.0)
        });
        CanonicalTable::from_bars(bars).unwrap()
    }

    #[test]
    fn test_rsi_default_config() {
        let config = RsiConfig::default();
        assert_eq!(config.window, 14);
        assert_relative_eq!(config.loss_epsilon, 0.0001);
    }

    #[test]
    fn test_rsi_refused_below_window() {
        let closes: Vec<f64> = (1..=13).map(f64::from).collect();
        let rsi = Rsi::<f64>::new(RsiConfig::default());

        assert_eq!(
            rsi.calculate(&create_test_table(&closes)).unwrap_err(),
            IndicatorError::InsufficientSamples {
                required: 14,
                actual: 13
            }
        );
    }

    #[test]
    fn test_rsi_single_value_at_window() {
        let closes = [
            44.0, 44.3, 44.1, 44.2, 43.6, 44.3, 44.8, 45.1, 45.4, 45.8, 46.1, 45.9, 46.2, 45.6,
        ];
        let rsi = Rsi::<f64>::new(RsiConfig::default());
        let result = rsi.calculate(&create_test_table(&closes)).unwrap();

        assert_eq!(result.len(), 1);
        let value = result.values()[0];
        assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn test_rsi_matches_simple_means() {
        // deltas: +1, -1, +2, -1 over a 5-row window (first delta is 0)
        let closes = [10.0, 11.0, 10.0, 12.0, 11.0];
        let rsi = Rsi::<f64>::new(RsiConfig::new(5));
        let result = rsi.calculate(&create_test_table(&closes)).unwrap();

        let avg_gain = 3.0 / 5.0;
        let avg_loss = 2.0 / 5.0;
        let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
        assert_relative_eq!(result.values()[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_rsi_leading_and_flat_changes_are_neutral() {
        // changes: (none), 0, +2; no losses, so the epsilon stands in
        let closes = [10.0, 10.0, 12.0];
        let rsi = Rsi::<f64>::new(RsiConfig::new(3));
        let result = rsi.calculate(&create_test_table(&closes)).unwrap();

        assert_eq!(result.len(), 1);
        let expected = 100.0 - 100.0 / (1.0 + (2.0 / 3.0) / 0.0001);
        assert_relative_eq!(result.values()[0], expected, epsilon = 1e-9);
    }

    #[test]
    fn test_rsi_all_gains_below_hundred() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
        let rsi = Rsi::<f64>::new(RsiConfig::default());
        let result = rsi.calculate(&create_test_table(&closes)).unwrap();

        for value in result.values().iter() {
            assert!(*value < 100.0);
            assert!(*value > 99.0);
        }
    }

    #[test]
    fn test_rsi_constant_prices_is_zero() {
        let rsi = Rsi::<f64>::new(RsiConfig::default());
        let result = rsi.calculate(&create_test_table(&[50.0; 20])).unwrap();

        assert_eq!(result.len(), 7);
        for value in result.values().iter() {
            assert_relative_eq!(*value, 0.0);
        }
    }

    #[test]
    fn test_rsi_all_losses_is_zero() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - f64::from(i)).collect();
        let rsi = Rsi::<f64>::new(RsiConfig::default());
        let result = rsi.calculate(&create_test_table(&closes)).unwrap();

        assert_relative_eq!(result.values()[0], 0.0);
    }
}
