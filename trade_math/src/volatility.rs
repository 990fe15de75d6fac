//! Volatility annualization

use crate::statistics::sample_std_dev;
use crate::{MathError, Result};

/// Scale a per-period standard deviation to an annual figure: `sd * sqrt(periods)`
pub fn annualize_volatility(per_period_std_dev: f64, periods_per_year: u32) -> Result<f64> {
    if periods_per_year == 0 {
        return Err(MathError::InvalidInput(
            "Periods per year must be greater than zero".to_string(),
        ));
    }
    if per_period_std_dev < 0.0 {
        return Err(MathError::InvalidInput(format!(
            "Standard deviation cannot be negative, got {}",
            per_period_std_dev
        )));
    }

    Ok(per_period_std_dev * f64::from(periods_per_year).sqrt())
}

/// Annualized volatility of a return series, based on the sample standard deviation
pub fn annualized_volatility(returns: &[f64], periods_per_year: u32) -> Result<f64> {
    annualize_volatility(sample_std_dev(returns)?, periods_per_year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_annualize_daily_volatility() {
        assert_relative_eq!(annualize_volatility(0.01, 252).unwrap(), 0.01 * 252f64.sqrt());
        assert!(annualize_volatility(0.01, 0).is_err());
        assert!(annualize_volatility(-0.01, 252).is_err());
    }

    #[test]
    fn test_annualized_volatility_of_returns() {
        let returns = [0.01, -0.02, 0.015, 0.0];
        let expected = sample_std_dev(&returns).unwrap() * 252f64.sqrt();
        assert_relative_eq!(annualized_volatility(&returns, 252).unwrap(), expected);

        assert!(matches!(
            annualized_volatility(&[0.01], 252),
            Err(MathError::InsufficientData(_))
        ));
    }
}
