//! # GBM Forecast
//!
//! Monte Carlo forecasting of daily stock prices with a Geometric Brownian
//! Motion model.
//!
//! ## Features
//!
//! - Price history handling (CSV loading, business-day calendar)
//! - Drift and volatility estimation from log returns
//! - Closed-form GBM path simulation, seeded and optionally parallel
//! - Per-day median and confidence band from linear-interpolated percentiles
//! - Storage rows, CSV/JSON export and a console report
//!
//! ## Pipeline
//!
//! ```text
//! prices -> log returns -> (mu, sigma) -> simulated paths -> median / bounds
//! ```
//!
//! The paths are reduced as soon as they are summarized unless
//! [`ForecastConfig::retain_paths`] is set.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gbm_forecast::{forecast, ForecastConfig, PriceSeries};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let series = PriceSeries::from_closes(start, &[100.0, 101.0, 99.0, 102.0, 103.0])?;
//!
//! let config = ForecastConfig::new(5, 1000).with_seed(42);
//! let result = forecast(&series, &config)?;
//!
//! assert_eq!(result.days().len(), 5);
//! for day in result.days() {
//!     assert!(day.lower <= day.median && day.median <= day.upper);
//! }
//! # Ok::<(), gbm_forecast::ForecastError>(())
//! ```

pub mod calendar;
pub mod config;
pub mod data;
pub mod error;
pub mod forecast;
pub mod models;
pub mod report;
pub mod simulation;
pub mod summary;

// Re-export commonly used types
pub use chrono::NaiveDate;

pub use crate::config::{ForecastConfig, HistoryWindow};
pub use crate::data::{DataLoader, PricePoint, PriceSeries};
pub use crate::error::{ForecastError, Result};
pub use crate::forecast::{forecast, ForecastResult, Forecaster};
pub use crate::models::{GbmEstimator, GbmParameters};
pub use crate::report::{write_rows_csv, ForecastReport, ForecastRow};
pub use crate::simulation::{PathEnsemble, PathSimulator, RandomSource, SimulatedPath};
pub use crate::summary::{DailyForecast, ForecastSummarizer};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
