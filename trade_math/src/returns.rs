//! Log return calculation
//!
//! Element `i` of the output is `ln(P[i] / P[i - 1])`, so a series of `n`
//! prices yields `n - 1` returns.

use crate::{MathError, Result};

/// Convert a chronological price series into log returns.
///
/// Fails with [`MathError::InvalidInput`] when fewer than two prices are
/// given or when any price is not strictly positive and finite.
pub fn log_returns(prices: &[f64]) -> Result<Vec<f64>> {
    if prices.len() < 2 {
        return Err(MathError::InvalidInput(format!(
            "At least 2 prices are required to compute a return, have {}",
            prices.len()
        )));
    }

    if let Some((index, price)) = prices
        .iter()
        .enumerate()
        .find(|(_, &p)| !(p.is_finite() && p > 0.0))
    {
        return Err(MathError::InvalidInput(format!(
            "Price at index {} must be positive and finite, got {}",
            index, price
        )));
    }

    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_returns_length_and_values() {
        let prices = [100.0, 101.0, 99.0, 102.0, 103.0];
        let returns = log_returns(&prices).unwrap();

        assert_eq!(returns.len(), prices.len() - 1);
        assert_relative_eq!(returns[0], (101.0_f64 / 100.0).ln());
        assert_relative_eq!(returns[3], (103.0_f64 / 102.0).ln());
    }

    #[test]
    fn test_log_returns_recover_price_ratios() {
        let prices = [50.0, 52.5, 51.0, 49.75, 60.0, 58.2];
        let returns = log_returns(&prices).unwrap();

        for (r, w) in returns.iter().zip(prices.windows(2)) {
            assert_relative_eq!(r.exp(), w[1] / w[0], max_relative = 1e-12);
        }
    }

    #[test]
    fn test_log_returns_reject_short_series() {
        assert!(matches!(
            log_returns(&[100.0]),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(log_returns(&[]), Err(MathError::InvalidInput(_))));
    }

    #[test]
    fn test_log_returns_reject_non_positive_prices() {
        assert!(matches!(
            log_returns(&[100.0, -5.0, 99.0]),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            log_returns(&[100.0, 0.0]),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            log_returns(&[100.0, f64::NAN]),
            Err(MathError::InvalidInput(_))
        ));
    }
}
