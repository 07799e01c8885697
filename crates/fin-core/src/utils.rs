//! Numeric building blocks shared by the indicators and the summary layer.
//!
//! Rolling functions return a series aligned with their input: the first
//! `window - 1` positions are NaN, as are windows that contain a NaN.

use crate::num::FinFloat;
use crate::series::Series;

/// Rolling mean over a trailing window.
///
/// Each window is summed directly rather than through a running total, so no
/// rounding residue carries over from earlier windows.
///
/// # Example
///
/// ```rust
/// use fin_core::utils::rolling_mean;
///
/// let data: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let result = rolling_mean(&data, 3);
/// assert!(result[0].is_nan());
/// assert!(result[1].is_nan());
/// assert_eq!(result[2], 2.0);
/// assert_eq!(result[4], 4.0);
/// ```
#[must_use]
pub fn rolling_mean<T: FinFloat>(data: &[T], window: usize) -> Series<T> {
    let divisor = <T as FinFloat>::from_usize(window);
    rolling_apply(data, window, |w| window_sum(w) / divisor)
}

/// Rolling sum over a trailing window.
#[must_use]
pub fn rolling_sum<T: FinFloat>(data: &[T], window: usize) -> Series<T> {
    rolling_apply(data, window, window_sum)
}

/// Rolling standard deviation.
///
/// `ddof` is the delta degrees of freedom: 1 gives the sample deviation.
#[must_use]
pub fn rolling_std<T: FinFloat>(data: &[T], window: usize, ddof: usize) -> Series<T> {
    rolling_variance(data, window, ddof).into_iter().map(|x| x.sqrt()).collect()
}

/// Rolling variance. Windows no larger than `ddof` are NaN.
#[must_use]
pub fn rolling_variance<T: FinFloat>(data: &[T], window: usize, ddof: usize) -> Series<T> {
    if window <= ddof {
        return Series::nan(data.len());
    }
    let divisor = <T as FinFloat>::from_usize(window - ddof);
    rolling_apply(data, window, |w| sum_sq_dev(w) / divisor)
}

fn rolling_apply<T, F>(data: &[T], window: usize, f: F) -> Series<T>
where
    T: FinFloat,
    F: Fn(&[T]) -> T,
{
    if window == 0 {
        return Series::nan(data.len());
    }

    let mut result = Vec::with_capacity(data.len());
    for _ in 0..window.saturating_sub(1).min(data.len()) {
        result.push(T::NAN);
    }
    for w in data.windows(window) {
        result.push(f(w));
    }
    Series::from_vec(result)
}

fn window_sum<T: FinFloat>(window: &[T]) -> T {
    window.iter().fold(T::ZERO, |acc, &x| acc + x)
}

fn sum_sq_dev<T: FinFloat>(window: &[T]) -> T {
    let mean = window_sum(window) / <T as FinFloat>::from_usize(window.len());
    window.iter().fold(T::ZERO, |acc, &x| {
        let d = x - mean;
        acc + d * d
    })
}

/// Pearson correlation over the positions where both inputs are defined.
///
/// Returns NaN when fewer than two complete pairs exist or either side has
/// zero variance.
#[must_use]
pub fn pearson<T: FinFloat>(x: &[T], y: &[T]) -> T {
    let pairs: Vec<(T, T)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_valid() && b.is_valid())
        .map(|(&a, &b)| (a, b))
        .collect();

    if pairs.len() < 2 {
        return T::NAN;
    }

    let n = <T as FinFloat>::from_usize(pairs.len());
    let mean_x = pairs.iter().fold(T::ZERO, |acc, p| acc + p.0) / n;
    let mean_y = pairs.iter().fold(T::ZERO, |acc, p| acc + p.1) / n;

    let (mut sxy, mut sxx, mut syy) = (T::ZERO, T::ZERO, T::ZERO);
    for &(a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy = sxy + dx * dy;
        sxx = sxx + dx * dx;
        syy = syy + dy * dy;
    }

    if sxx <= T::ZERO || syy <= T::ZERO {
        return T::NAN;
    }

    (sxy / (sxx * syy).sqrt()).clamp_value(-T::ONE, T::ONE)
}

/// Quantile of ascending-sorted data with linear interpolation between the
/// closest ranks (the R-7 / numpy `linear` method).
///
/// `q` is clamped to `[0, 1]`. Returns NaN for empty input.
#[must_use]
pub fn quantile_sorted<T: FinFloat>(sorted: &[T], q: f64) -> T {
    if sorted.is_empty() {
        return T::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;

    if lower == upper {
        return sorted[lower];
    }

    let frac = T::from_f64_lossy(pos - lower as f64);
    sorted[lower] + frac * (sorted[upper] - sorted[lower])
}

/// Ordinary least-squares line through `(x, y)`.
///
/// Returns `(slope, intercept)`, or `None` when fewer than two points are
/// given or every `x` is the same.
#[must_use]
pub fn ols_fit<T: FinFloat>(x: &[T], y: &[T]) -> Option<(T, T)> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }

    let count = <T as FinFloat>::from_usize(n);
    let mean_x = window_sum(&x[..n]) / count;
    let mean_y = window_sum(&y[..n]) / count;

    let (mut sxy, mut sxx) = (T::ZERO, T::ZERO);
    for i in 0..n {
        let dx = x[i] - mean_x;
        sxy = sxy + dx * (y[i] - mean_y);
        sxx = sxx + dx * dx;
    }

    if sxx <= T::ZERO || !sxx.is_valid() {
        return None;
    }

    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}
