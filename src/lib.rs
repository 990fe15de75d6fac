//! # Stock Forecast Workspace
//!
//! Facade over the workspace crates:
//!
//! - [`trade_math`]: log returns, sample statistics and percentiles
//! - [`gbm_forecast`]: GBM parameter estimation, Monte Carlo simulation and
//!   forecast summaries
//!
//! ## Example
//!
//! ```
//! use stock_forecast_workspace::gbm_forecast::{forecast, ForecastConfig, PriceSeries};
//! use stock_forecast_workspace::trade_math::log_returns;
//! use stock_forecast_workspace::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 2).ok_or("bad date")?;
//! let series = PriceSeries::from_closes(start, &[10.0, 10.5, 10.2, 10.8])?;
//! assert_eq!(log_returns(&series.closes())?.len(), 3);
//!
//! let result = forecast(&series, &ForecastConfig::new(3, 100).with_seed(1))?;
//! assert_eq!(result.horizon(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use gbm_forecast;
pub use trade_math;

/// Calendar date type used throughout the forecast API
pub use gbm_forecast::NaiveDate;
