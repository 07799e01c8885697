//! The trait every indicator implements.

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{IndicatorError, Result};
use crate::num::FinFloat;
use crate::ohlcv::CanonicalTable;

/// Configuration trait bounds for indicator configurations.
#[cfg(feature = "serde")]
pub trait IndicatorConfig: Clone + Default + Serialize + DeserializeOwned + Send + Sync {}

/// Configuration trait bounds for indicator configurations.
#[cfg(not(feature = "serde"))]
pub trait IndicatorConfig: Clone + Default + Send + Sync {}

#[cfg(feature = "serde")]
impl<T> IndicatorConfig for T where T: Clone + Default + Serialize + DeserializeOwned + Send + Sync {}

#[cfg(not(feature = "serde"))]
impl<T> IndicatorConfig for T where T: Clone + Default + Send + Sync {}

/// A computation over a canonical table.
///
/// Implementations never mutate the table, so any number of indicators may
/// read the same table at once.
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl<T: FinFloat> Indicator<T> for Rsi<T> {
///     type Output = DatedSeries<T>;
///     type Config = RsiConfig;
///
///     fn new(config: Self::Config) -> Self { /* ... */ }
///     fn name(&self) -> &'static str { "rsi" }
///     fn min_periods(&self) -> usize { self.config.period }
///     fn calculate(&self, data: &CanonicalTable<T>) -> Result<Self::Output> { /* ... */ }
///     fn config(&self) -> &Self::Config { &self.config }
/// }
/// ```
pub trait Indicator<T: FinFloat>: Send + Sync {
    /// The output type of calculations.
    type Output;

    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Create a new indicator with the given configuration.
    fn new(config: Self::Config) -> Self;

    /// Short identifier used in reports and logs.
    fn name(&self) -> &'static str;

    /// Minimum number of rows for a result. Below it the indicator is
    /// refused with [`IndicatorError::InsufficientSamples`].
    fn min_periods(&self) -> usize;

    /// Compute over the whole table.
    ///
    /// # Errors
    ///
    /// Returns an error if there isn't enough data or if computation fails.
    fn calculate(&self, data: &CanonicalTable<T>) -> Result<Self::Output>;

    /// Get a reference to the current configuration.
    fn config(&self) -> &Self::Config;

    /// Refuse tables shorter than [`Indicator::min_periods`].
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InsufficientSamples`].
    fn ensure_min_periods(&self, data: &CanonicalTable<T>) -> Result<()> {
        let required = self.min_periods();
        if data.len() < required {
            return Err(IndicatorError::InsufficientSamples {
                required,
                actual: data.len(),
            });
        }
        Ok(())
    }
}
