//! Geometric Brownian Motion parameter estimation
//!
//! The price follows `dS = mu * S dt + sigma * S dW`. From daily log returns
//! `r` and `A` trading periods per year:
//!
//! - `sigma = sqrt(A) * sd(r)` with the `n - 1` divisor
//! - `mu = A * mean(r) + sigma^2 / 2`
//!
//! The mean log return estimates the median growth rate `mu - sigma^2 / 2`,
//! so the correction term recovers the arithmetic drift used by the
//! closed-form solution `S_t = S_0 * exp((mu - sigma^2 / 2) t + sigma W_t)`.

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;
use trade_math::{annualize_volatility, log_returns, mean, sample_std_dev, TRADING_DAYS_PER_YEAR};

/// Annualized drift and volatility of a GBM process
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GbmParameters {
    drift: f64,
    volatility: f64,
}

impl GbmParameters {
    /// Fails with [`ForecastError::InvalidParameter`] if either value is not
    /// finite or the volatility is negative.
    pub fn new(drift: f64, volatility: f64) -> Result<Self> {
        if !drift.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "Drift must be finite, got {}",
                drift
            )));
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Volatility must be finite and non-negative, got {}",
                volatility
            )));
        }
        Ok(Self { drift, volatility })
    }

    /// Annualized drift (mu)
    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Annualized volatility (sigma)
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Expected annual log growth, `mu - sigma^2 / 2`
    pub fn expected_annual_return(&self) -> f64 {
        self.drift - 0.5 * self.volatility * self.volatility
    }

    /// Closed-form quantile of the log-normal price at `t_years`
    pub fn analytic_quantile(&self, s0: f64, t_years: f64, q: f64) -> Result<f64> {
        if !(q > 0.0 && q < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Quantile must be strictly between 0 and 1, got {}",
                q
            )));
        }
        if t_years < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Time must be non-negative, got {}",
                t_years
            )));
        }

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::NumericalError(e.to_string()))?;
        let z = normal.inverse_cdf(q);

        Ok(s0 * (self.expected_annual_return() * t_years + self.volatility * t_years.sqrt() * z).exp())
    }
}

/// Estimates [`GbmParameters`] from historical prices or log returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GbmEstimator {
    periods_per_year: u32,
}

impl Default for GbmEstimator {
    fn default() -> Self {
        Self {
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl GbmEstimator {
    pub fn new(periods_per_year: u32) -> Result<Self> {
        if periods_per_year == 0 {
            return Err(ForecastError::InvalidParameter(
                "Trading periods per year must be greater than zero".to_string(),
            ));
        }
        Ok(Self { periods_per_year })
    }

    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// Estimate drift and volatility from a log return series.
    ///
    /// At least two returns are required; a single return has no sample
    /// standard deviation and is reported as [`ForecastError::InsufficientData`].
    pub fn estimate(&self, returns: &[f64]) -> Result<GbmParameters> {
        if returns.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "Volatility estimation needs at least 2 log returns, have {}",
                returns.len()
            )));
        }

        let periods = f64::from(self.periods_per_year);
        let volatility = annualize_volatility(sample_std_dev(returns)?, self.periods_per_year)?;
        let drift = periods * mean(returns)? + 0.5 * volatility * volatility;

        debug!(returns = returns.len(), drift, volatility, "estimated GBM parameters");

        GbmParameters::new(drift, volatility)
    }

    /// Compute log returns from `series` and estimate from them
    pub fn estimate_from_prices(&self, series: &PriceSeries) -> Result<GbmParameters> {
        let returns = log_returns(&series.closes())?;
        self.estimate(&returns)
    }
}
