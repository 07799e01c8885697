//! Floating-point abstraction shared by every computation in the workspace.
//!
//! [`FinFloat`] lets the normalizer and all indicators run on either `f32` or
//! `f64` without duplicating the algorithms.

use core::cmp::Ordering;
use num_traits::{Float, FromPrimitive, ToPrimitive};

/// Serialization bound, empty unless the `serde` feature is enabled.
#[cfg(feature = "serde")]
pub trait MaybeSerde: serde::Serialize + serde::de::DeserializeOwned {}

#[cfg(feature = "serde")]
impl<T> MaybeSerde for T where T: serde::Serialize + serde::de::DeserializeOwned {}

/// Serialization bound, empty unless the `serde` feature is enabled.
#[cfg(not(feature = "serde"))]
pub trait MaybeSerde {}

#[cfg(not(feature = "serde"))]
impl<T> MaybeSerde for T {}

/// Floating-point type used for prices, volumes and indicator values.
///
/// # Example
///
/// ```rust
/// use fin_core::FinFloat;
///
/// fn relative_strength<T: FinFloat>(avg_gain: T, avg_loss: T) -> T {
///     let rs = avg_gain / avg_loss;
///     T::HUNDRED - T::HUNDRED / (T::ONE + rs)
/// }
///
/// assert_eq!(relative_strength(1.0_f64, 1.0), 50.0);
/// ```
pub trait FinFloat:
    Float + FromPrimitive + ToPrimitive + Copy + Send + Sync + Default + MaybeSerde + 'static
{
    /// Not-a-number value, used for warm-up positions of rolling series.
    const NAN: Self;
    /// Zero value.
    const ZERO: Self;
    /// One value.
    const ONE: Self;
    /// Two value.
    const TWO: Self;
    /// One half.
    const HALF: Self;
    /// Hundred value (percentages, RSI scale).
    const HUNDRED: Self;

    /// Convert from `f64`, rounding when the target is narrower.
    #[must_use]
    fn from_f64_lossy(value: f64) -> Self;

    /// Convert to `f64`.
    #[must_use]
    fn to_f64_lossy(self) -> f64;

    /// Convert from `usize`.
    #[must_use]
    fn from_usize(value: usize) -> Self;

    /// `true` when the value is neither NaN nor infinite.
    #[must_use]
    fn is_valid(self) -> bool {
        !self.is_nan() && !self.is_infinite()
    }

    /// Total ordering with NaN sorted after every other value.
    #[must_use]
    fn total_cmp_fn(&self, other: &Self) -> Ordering;

    /// Clamp to `[min, max]`; NaN stays NaN.
    #[must_use]
    fn clamp_value(self, min: Self, max: Self) -> Self {
        if self.is_nan() {
            self
        } else if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }
}

impl FinFloat for f32 {
    const NAN: Self = f32::NAN;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HALF: Self = 0.5;
    const HUNDRED: Self = 100.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f32
    }

    #[inline]
    fn total_cmp_fn(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl FinFloat for f64 {
    const NAN: Self = f64::NAN;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HALF: Self = 0.5;
    const HUNDRED: Self = 100.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f64
    }

    #[inline]
    fn total_cmp_fn(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}
