//! Time series containers.
//!
//! [`Series`] is a contiguous column of values; [`DatedSeries`] pairs a series
//! with the canonical-table dates it is aligned to.

use core::ops::Index;

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::num::FinFloat;

/// A contiguous series of floating-point values.
///
/// # Example
///
/// ```rust
/// use fin_core::Series;
///
/// let mut series: Series<f64> = Series::new();
/// series.push(100.0);
/// series.push(101.5);
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.latest(), Some(101.5));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat", transparent))]
pub struct Series<T: FinFloat> {
    data: Vec<T>,
}

impl<T: FinFloat> Default for Series<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FinFloat> Series<T> {
    /// Create a new empty series.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a new series with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a series from an existing vector.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Create a series of `len` NaN values.
    #[must_use]
    pub fn nan(len: usize) -> Self {
        Self {
            data: vec![T::NAN; len],
        }
    }

    /// Returns the number of elements in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the series contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a value to the end of the series.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Get the value at the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Get the first value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Get the last value, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.data.last()
    }

    /// The scalar value of the most recent data point.
    ///
    /// This is the single accessor used wherever a "current" value is read
    /// (last price, latest indicator reading); it never needs unwrapping of
    /// nested containers.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.data.last().copied()
    }

    /// Get the last `n` values as a slice (the whole series if `n > len()`).
    #[must_use]
    pub fn tail(&self, n: usize) -> &[T] {
        let start = self.len().saturating_sub(n);
        &self.data[start..]
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// First differences `y[i] = x[i] - x[i-1]`; the first element is NaN.
    #[must_use]
    pub fn diff(&self) -> Self {
        if self.is_empty() {
            return Self::new();
        }

        let mut result = Vec::with_capacity(self.len());
        result.push(T::NAN);
        result.extend(self.data.windows(2).map(|w| w[1] - w[0]));

        Self { data: result }
    }

    /// Count the number of NaN values.
    #[must_use]
    pub fn nan_count(&self) -> usize {
        self.data.iter().filter(|x| x.is_nan()).count()
    }

    /// Iterator over the non-NaN values.
    pub fn valid(&self) -> impl Iterator<Item = T> + '_ {
        self.data.iter().copied().filter(|x| !x.is_nan())
    }

    /// Sum of the non-NaN values.
    #[must_use]
    pub fn sum(&self) -> T {
        self.valid().fold(T::ZERO, |acc, x| acc + x)
    }

    /// Mean of the non-NaN values, NaN if there are none.
    #[must_use]
    pub fn mean(&self) -> T {
        let count = self.valid().count();
        if count == 0 {
            return T::NAN;
        }
        self.sum() / <T as FinFloat>::from_usize(count)
    }

    /// Sample standard deviation (n - 1) of the non-NaN values.
    ///
    /// NaN when fewer than two values are present.
    #[must_use]
    pub fn std(&self) -> T {
        let count = self.valid().count();
        if count < 2 {
            return T::NAN;
        }
        let mean = self.mean();
        let sum_sq = self.valid().fold(T::ZERO, |acc, x| acc + (x - mean) * (x - mean));
        (sum_sq / <T as FinFloat>::from_usize(count - 1)).sqrt()
    }

    /// Minimum non-NaN value, `None` if there are none.
    #[must_use]
    pub fn min(&self) -> Option<T> {
        self.valid().reduce(|acc, x| if x < acc { x } else { acc })
    }

    /// Maximum non-NaN value, `None` if there are none.
    #[must_use]
    pub fn max(&self) -> Option<T> {
        self.valid().reduce(|acc, x| if x > acc { x } else { acc })
    }
}

impl<T: FinFloat> Index<usize> for Series<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: FinFloat> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T: FinFloat> IntoIterator for Series<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T: FinFloat> IntoIterator for &'a Series<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: FinFloat> From<Vec<T>> for Series<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: FinFloat> From<&[T]> for Series<T> {
    fn from(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

/// A series aligned point-for-point with a list of dates.
///
/// Indicator outputs use this so a presentation layer can plot them against
/// the same x-axis as the canonical table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "DatedSeriesParts<T>",
        into = "DatedSeriesParts<T>",
        bound = "T: FinFloat"
    )
)]
pub struct DatedSeries<T: FinFloat> {
    dates: Vec<NaiveDate>,
    values: Series<T>,
}

/// Wire form of a [`DatedSeries`]; decoding goes through the length check.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(bound = "T: FinFloat")]
struct DatedSeriesParts<T: FinFloat> {
    dates: Vec<NaiveDate>,
    values: Series<T>,
}

#[cfg(feature = "serde")]
impl<T: FinFloat> TryFrom<DatedSeriesParts<T>> for DatedSeries<T> {
    type Error = IndicatorError;

    fn try_from(parts: DatedSeriesParts<T>) -> Result<Self> {
        Self::new(parts.dates, parts.values)
    }
}

#[cfg(feature = "serde")]
impl<T: FinFloat> From<DatedSeries<T>> for DatedSeriesParts<T> {
    fn from(series: DatedSeries<T>) -> Self {
        Self {
            dates: series.dates,
            values: series.values,
        }
    }
}

impl<T: FinFloat> DatedSeries<T> {
    /// Pair dates with values.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if the lengths differ.
    pub fn new(dates: Vec<NaiveDate>, values: Series<T>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(IndicatorError::LengthMismatch {
                expected: dates.len(),
                actual: values.len(),
            });
        }
        Ok(Self { dates, values })
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The dates, in table order.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The values.
    #[must_use]
    pub fn values(&self) -> &Series<T> {
        &self.values
    }

    /// Iterate over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, T)> + '_ {
        self.dates
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// The most recent `(date, value)` point.
    #[must_use]
    pub fn latest(&self) -> Option<(NaiveDate, T)> {
        Some((*self.dates.last()?, self.values.latest()?))
    }

    /// Number of defined (non-NaN) points.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.values.len() - self.values.nan_count()
    }

    /// Keep only the points whose value is defined.
    #[must_use]
    pub fn dropna(&self) -> Self {
        let (dates, values): (Vec<_>, Vec<_>) =
            self.iter().filter(|(_, v)| !v.is_nan()).unzip();
        Self {
            dates,
            values: Series::from_vec(values),
        }
    }
}
