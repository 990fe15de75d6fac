//! Price models fitted to historical data

pub mod gbm;

pub use gbm::{GbmEstimator, GbmParameters};
