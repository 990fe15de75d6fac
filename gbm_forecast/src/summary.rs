//! Reduction of a path ensemble to per-day median and confidence bounds
//!
//! Percentiles use linear interpolation between order statistics
//! (see [`trade_math::percentile_sorted`]).

use crate::config::DEFAULT_CONFIDENCE_LEVEL;
use crate::error::{ForecastError, Result};
use crate::simulation::PathEnsemble;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trade_math::percentile_sorted;

/// Forecast for a single future trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub median: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Computes median and a central confidence band for every forecast day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSummarizer {
    lower_quantile: f64,
    upper_quantile: f64,
}

impl Default for ForecastSummarizer {
    fn default() -> Self {
        Self {
            lower_quantile: (1.0 - DEFAULT_CONFIDENCE_LEVEL) / 2.0,
            upper_quantile: 1.0 - (1.0 - DEFAULT_CONFIDENCE_LEVEL) / 2.0,
        }
    }
}

impl ForecastSummarizer {
    /// Summarizer whose band covers `confidence_level` of the simulated mass,
    /// e.g. 0.95 gives the 2.5th and 97.5th percentiles
    pub fn new(confidence_level: f64) -> Result<Self> {
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Confidence level must be between 0 and 1, got {}",
                confidence_level
            )));
        }
        let tail = (1.0 - confidence_level) / 2.0;
        Ok(Self {
            lower_quantile: tail,
            upper_quantile: 1.0 - tail,
        })
    }

    pub fn lower_quantile(&self) -> f64 {
        self.lower_quantile
    }

    pub fn upper_quantile(&self) -> f64 {
        self.upper_quantile
    }

    /// One [`DailyForecast`] per day of the ensemble, dated by `dates`
    pub fn summarize(
        &self,
        ensemble: &PathEnsemble,
        dates: &[NaiveDate],
    ) -> Result<Vec<DailyForecast>> {
        if ensemble.is_empty() {
            return Err(ForecastError::InsufficientData(
                "Cannot summarize an empty ensemble".to_string(),
            ));
        }
        if dates.len() != ensemble.horizon() {
            return Err(ForecastError::InvalidInput(format!(
                "Calendar has {} dates but the ensemble covers {} days",
                dates.len(),
                ensemble.horizon()
            )));
        }

        dates
            .iter()
            .enumerate()
            .map(|(i, &date)| -> Result<DailyForecast> {
                let mut prices = ensemble.prices_on_day(i + 1).ok_or_else(|| {
                    ForecastError::InvalidInput(format!("Ensemble has no day {}", i + 1))
                })?;
                prices.sort_by(f64::total_cmp);

                Ok(DailyForecast {
                    date,
                    median: percentile_sorted(&prices, 0.5)?,
                    lower: percentile_sorted(&prices, self.lower_quantile)?,
                    upper: percentile_sorted(&prices, self.upper_quantile)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::business_days_after;
    use crate::simulation::SimulatedPath;
    use approx::assert_relative_eq;

    fn ensemble(rows: &[&[f64]]) -> PathEnsemble {
        PathEnsemble::new(rows.iter().map(|r| SimulatedPath::new(r.to_vec())).collect()).unwrap()
    }

    fn dates(n: usize) -> Vec<NaiveDate> {
        business_days_after(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), n)
    }

    #[test]
    fn test_default_band_is_95_percent() {
        let summarizer = ForecastSummarizer::default();
        assert_relative_eq!(summarizer.lower_quantile(), 0.025, max_relative = 1e-12);
        assert_relative_eq!(summarizer.upper_quantile(), 0.975, max_relative = 1e-12);
    }

    #[test]
    fn test_linear_percentiles_per_day() {
        // day 1 sample: 1..=5, day 2 sample: 10..=50
        let ens = ensemble(&[
            &[3.0, 30.0],
            &[1.0, 10.0],
            &[5.0, 50.0],
            &[2.0, 20.0],
            &[4.0, 40.0],
        ]);
        let rows = ForecastSummarizer::default().summarize(&ens, &dates(2)).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].median, 3.0);
        assert_relative_eq!(rows[0].lower, 1.1, max_relative = 1e-9);
        assert_relative_eq!(rows[0].upper, 4.9, max_relative = 1e-9);
        assert_eq!(rows[1].median, 30.0);
        assert_relative_eq!(rows[1].lower, 11.0, max_relative = 1e-9);
        assert_relative_eq!(rows[1].upper, 49.0, max_relative = 1e-9);
    }

    #[test]
    fn test_single_path_collapses_band() {
        let ens = ensemble(&[&[101.0, 102.5, 99.0]]);
        let rows = ForecastSummarizer::default().summarize(&ens, &dates(3)).unwrap();

        for (row, expected) in rows.iter().zip([101.0, 102.5, 99.0]) {
            assert_eq!(row.lower, expected);
            assert_eq!(row.median, expected);
            assert_eq!(row.upper, expected);
        }
    }

    #[test]
    fn test_calendar_length_must_match() {
        let ens = ensemble(&[&[1.0, 2.0]]);
        let result = ForecastSummarizer::default().summarize(&ens, &dates(3));
        assert!(matches!(result, Err(ForecastError::InvalidInput(_))));
    }
}
