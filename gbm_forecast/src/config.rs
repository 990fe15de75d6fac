//! Forecast run configuration

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use trade_math::TRADING_DAYS_PER_YEAR;

/// Default forecast horizon, roughly six months of trading days
pub const DEFAULT_HORIZON_DAYS: usize = 126;
/// Default number of Monte Carlo trials
pub const DEFAULT_TRIAL_COUNT: usize = 1000;
/// Default width of the forecast band
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Settings for one forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of trading days to forecast
    pub horizon_days: usize,
    /// Number of simulated paths
    pub trial_count: usize,
    /// Annualization constant
    pub trading_periods_per_year: u32,
    /// Seed for reproducible runs; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Central probability mass covered by the lower/upper bounds
    pub confidence_level: f64,
    /// Run trials on the rayon thread pool
    pub parallel: bool,
    /// Keep every simulated path in the result.
    /// Memory grows with `trial_count * horizon_days`.
    pub retain_paths: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            trial_count: DEFAULT_TRIAL_COUNT,
            trading_periods_per_year: TRADING_DAYS_PER_YEAR,
            seed: None,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            parallel: true,
            retain_paths: false,
        }
    }
}

impl ForecastConfig {
    pub fn new(horizon_days: usize, trial_count: usize) -> Self {
        Self {
            horizon_days,
            trial_count,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_trading_periods_per_year(mut self, periods: u32) -> Self {
        self.trading_periods_per_year = periods;
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_retained_paths(mut self, retain: bool) -> Self {
        self.retain_paths = retain;
        self
    }

    /// Check every field is within its domain
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least one day".to_string(),
            ));
        }
        if self.trial_count == 0 {
            return Err(ForecastError::InvalidParameter(
                "Trial count must be greater than zero".to_string(),
            ));
        }
        if self.trading_periods_per_year == 0 {
            return Err(ForecastError::InvalidParameter(
                "Trading periods per year must be greater than zero".to_string(),
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Confidence level must be between 0 and 1, got {}",
                self.confidence_level
            )));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// How much history the command-line tool feeds into a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryWindow {
    /// Keep only this many of the most recent prices
    pub lookback: usize,
    /// Refuse to forecast from fewer prices than this
    pub min_history: usize,
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self {
            lookback: TRADING_DAYS_PER_YEAR as usize,
            min_history: 60,
        }
    }
}

impl HistoryWindow {
    /// Check `history` has at least `min_history` prices and keep the most
    /// recent `lookback` of them.
    pub fn apply(&self, history: &PriceSeries) -> Result<PriceSeries> {
        if history.len() < self.min_history {
            return Err(ForecastError::InsufficientData(format!(
                "History has {} prices, need at least {}",
                history.len(),
                self.min_history
            )));
        }
        Ok(history.tail(self.lookback))
    }
}
