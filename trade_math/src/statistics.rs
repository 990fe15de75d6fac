//! Descriptive statistics with pinned conventions
//!
//! - Variance and standard deviation use the unbiased `n - 1` divisor.
//! - Percentiles use linear interpolation on rank: for a sorted sample
//!   `x[0..n]` and a fraction `q`, the position is `h = q * (n - 1)` and the
//!   result is `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.

use crate::{MathError, Result};

/// Arithmetic mean of a sample.
///
/// Deviations are summed relative to the first value, so a constant sample
/// returns that value exactly.
pub fn mean(values: &[f64]) -> Result<f64> {
    let first = match values.first() {
        Some(&first) => first,
        None => {
            return Err(MathError::InsufficientData(
                "Cannot compute the mean of an empty sample".to_string(),
            ))
        }
    };

    let shift: f64 = values.iter().map(|&x| x - first).sum();
    Ok(first + shift / values.len() as f64)
}

/// Unbiased sample variance (divisor `n - 1`)
pub fn sample_variance(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Sample variance needs at least 2 values, have {}",
            values.len()
        )));
    }

    let mean = mean(values)?;
    let sum_sq: f64 = values
        .iter()
        .map(|&x| {
            let diff = x - mean;
            diff * diff
        })
        .sum();

    Ok(sum_sq / (values.len() - 1) as f64)
}

/// Sample standard deviation (square root of [`sample_variance`])
pub fn sample_std_dev(values: &[f64]) -> Result<f64> {
    Ok(sample_variance(values)?.sqrt())
}

/// Percentile of an already sorted sample using linear interpolation.
///
/// `q` is a fraction in `[0, 1]` (0.5 is the median).
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute a percentile of an empty sample".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(MathError::InvalidInput(format!(
            "Percentile fraction must be within [0, 1], got {}",
            q
        )));
    }

    let n = sorted.len();
    if n == 1 {
        return Ok(sorted[0]);
    }

    let rank = q * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if lower == upper {
        Ok(sorted[lower])
    } else {
        Ok(sorted[lower] + frac * (sorted[upper] - sorted[lower]))
    }
}

/// Percentile of an unsorted sample; see [`percentile_sorted`].
pub fn percentile(values: &[f64], q: f64) -> Result<f64> {
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::InvalidInput(
            "Sample contains NaN values".to_string(),
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, q)
}

/// Median of an unsorted sample
pub fn median(values: &[f64]) -> Result<f64> {
    percentile(values, 0.5)
}
