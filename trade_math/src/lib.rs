//! # Trade Math
//!
//! Numeric building blocks for price-series models.
//! This crate turns closing prices into log returns, computes sample
//! statistics with an explicit `n - 1` divisor, evaluates percentiles with
//! linear interpolation between order statistics and annualizes volatility.

use thiserror::Error;

pub mod returns;
pub mod statistics;
pub mod volatility;

pub use returns::log_returns;
pub use statistics::{mean, median, percentile, percentile_sorted, sample_std_dev, sample_variance};
pub use volatility::{annualize_volatility, annualized_volatility};

/// Conventional number of trading days in a year
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Errors that can occur in price-series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trading math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = MathError::InsufficientData("need 2 values, have 1".to_string());
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: need 2 values, have 1"
        );
    }
}
