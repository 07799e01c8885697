//! Histogram of close prices.

use fin_core::{
    error::{IndicatorError, Result},
    num::FinFloat,
    ohlcv::CanonicalTable,
    traits::Indicator,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use core::marker::PhantomData;

/// Configuration for the price distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PriceDistributionConfig {
    /// Upper bound on the bucket count (default: 50).
    pub max_bins: usize,
    /// Bucket count when half the row count rounds down to zero
    /// (default: 10).
    pub fallback_bins: usize,
}

impl Default for PriceDistributionConfig {
    fn default() -> Self {
        Self {
            max_bins: 50,
            fallback_bins: 10,
        }
    }
}

impl PriceDistributionConfig {
    /// Bucket count for a table of `rows` rows: `min(max_bins, rows / 2)`,
    /// or the fallback when `rows / 2 == 0`.
    pub fn bin_count(&self, rows: usize) -> usize {
        let half = rows / 2;
        let bins = if half == 0 { self.fallback_bins } else { half };
        bins.min(self.max_bins).max(1)
    }
}

/// Equal-width histogram.
///
/// Every bucket is half-open except the last, which also holds the maximum.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat"))]
pub struct Histogram<T: FinFloat> {
    /// Bucket boundaries, one more than the bucket count.
    pub edges: Vec<T>,
    /// Values per bucket.
    pub counts: Vec<usize>,
}

impl<T: FinFloat> Histogram<T> {
    /// Number of buckets.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Distribution of close prices as a histogram.
#[derive(Debug, Clone)]
pub struct PriceDistribution<T: FinFloat> {
    config: PriceDistributionConfig,
    _marker: PhantomData<T>,
}

impl<T: FinFloat> Indicator<T> for PriceDistribution<T> {
    type Output = Histogram<T>;
    type Config = PriceDistributionConfig;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    fn name(&self) -> &'static str {
        "price_distribution"
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, data: &CanonicalTable<T>) -> Result<Self::Output> {
        self.ensure_min_periods(data)?;

        let close = data.close();
        let (Some(min), Some(max)) = (close.min(), close.max()) else {
            return Err(IndicatorError::ComputationFault(
                "close column has no finite values".to_string(),
            ));
        };

        let bins = self.config.bin_count(data.len());
        let (lo, hi) = if max > min {
            (min, max)
        } else {
            (min - T::HALF, max + T::HALF)
        };

        let n_bins = <T as FinFloat>::from_usize(bins);
        let width = (hi - lo) / n_bins;
        let edges: Vec<T> = (0..=bins)
            .map(|i| {
                if i == bins {
                    hi
                } else {
                    lo + width * <T as FinFloat>::from_usize(i)
                }
            })
            .collect();

        let mut counts = vec![0usize; bins];
        for &value in close.iter() {
            let pos = ((value - lo) / width).floor();
            let idx = pos.to_usize().unwrap_or(0).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Histogram { edges, counts })
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_bin_count_policy() {
        let config = PriceDistributionConfig::default();
        assert_eq!(config.bin_count(1), 10);
        assert_eq!(config.bin_count(2), 1);
        assert_eq!(config.bin_count(30), 15);
        assert_eq!(config.bin_count(500), 50);
    }

    #[test]
    fn test_single_row_uses_fallback() {
        let dist = PriceDistribution::<f64>::new(PriceDistributionConfig::default());
        let hist = dist.calculate(&create_test_table(&[42.0])).unwrap();

        assert_eq!(hist.bins(), 10);
        assert_eq!(hist.total(), 1);
        assert_eq!(hist.edges.first(), Some(&41.5));
        assert_eq!(hist.edges.last(), Some(&42.5));
    }

    #[test]
    fn test_counts_cover_all_rows() {
        let closes: Vec<f64> = (1..=40).map(f64::from).collect();
        let dist = PriceDistribution::<f64>::new(PriceDistributionConfig::default());
        let hist = dist.calculate(&create_test_table(&closes)).unwrap();

        assert_eq!(hist.bins(), 20);
        assert_eq!(hist.edges.len(), 21);
        assert_eq!(hist.total(), 40);
        // maximum lands in the closed last bucket
        assert!(hist.counts[19] >= 1);
    }

    #[test]
    fn test_empty_table_refused() {
        let dist = PriceDistribution::<f64>::new(PriceDistributionConfig::default());
        assert!(dist
            .calculate(&CanonicalTable::empty())
            .unwrap_err()
            .is_insufficient());
    }
}
