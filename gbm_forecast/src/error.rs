//! Error types for the gbm_forecast crate

use thiserror::Error;
use trade_math::MathError;

/// Custom error types for the gbm_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed or non-positive price data, or a series too short to yield a return
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Enough prices for returns but too few to estimate volatility
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Run configuration outside its domain
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A simulated price left the finite positive range
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while reading or writing CSV
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error while reading a config file or writing JSON output
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidInput(msg) => ForecastError::InvalidInput(msg),
            MathError::InsufficientData(msg) => ForecastError::InsufficientData(msg),
            MathError::CalculationError(msg) => ForecastError::NumericalError(msg),
        }
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::JsonError(err.to_string())
    }
}
