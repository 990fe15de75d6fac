//! End-to-end GBM forecast: returns, parameters, simulation, summary

use crate::calendar::business_days_after;
use crate::config::ForecastConfig;
use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::{GbmEstimator, GbmParameters};
use crate::simulation::{PathEnsemble, PathSimulator, RandomSource};
use crate::summary::{DailyForecast, ForecastSummarizer};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// Output of a forecast run
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    current_price: f64,
    last_date: NaiveDate,
    history_len: usize,
    params: GbmParameters,
    periods_per_year: u32,
    expected_annual_return: f64,
    trial_count: usize,
    seed: u64,
    confidence_level: f64,
    days: Vec<DailyForecast>,
    closed_form: DailyForecast,
    #[serde(skip)]
    paths: Option<PathEnsemble>,
}

impl ForecastResult {
    /// Last observed closing price (the simulation's starting price)
    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    /// Date of the last observed price
    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    /// Number of historical prices the parameters were estimated from
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    pub fn params(&self) -> GbmParameters {
        self.params
    }

    /// Estimated annual drift (mu)
    pub fn drift(&self) -> f64 {
        self.params.drift()
    }

    /// Estimated annual volatility (sigma)
    pub fn volatility(&self) -> f64 {
        self.params.volatility()
    }

    /// Annualization constant the parameters were estimated with
    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// `mu - sigma^2 / 2`
    pub fn expected_annual_return(&self) -> f64 {
        self.expected_annual_return
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    /// Seed the run used; pass it back in the config to reproduce the run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Per-day median and bounds, in date order
    pub fn days(&self) -> &[DailyForecast] {
        &self.days
    }

    pub fn horizon(&self) -> usize {
        self.days.len()
    }

    /// Forecast for the final day of the horizon
    pub fn final_day(&self) -> Option<&DailyForecast> {
        self.days.last()
    }

    /// Log-normal median and band for the final day, computed in closed form
    /// from the estimated parameters at `t = horizon / periods_per_year`
    pub fn closed_form_final_day(&self) -> &DailyForecast {
        &self.closed_form
    }

    /// Simulated paths, present only when the run was configured to retain them
    pub fn paths(&self) -> Option<&PathEnsemble> {
        self.paths.as_ref()
    }
}

/// Runs forecasts with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast from `series`.
    ///
    /// All validation happens before any simulation: the run either returns a
    /// complete result or fails with the first problem found.
    pub fn forecast(&self, series: &PriceSeries) -> Result<ForecastResult> {
        let config = &self.config;
        config.validate()?;

        let last = series
            .last()
            .ok_or_else(|| ForecastError::InvalidInput("Price series is empty".to_string()))?;
        let dates = business_days_after(last.date, config.horizon_days);
        if dates.len() != config.horizon_days {
            return Err(ForecastError::InvalidParameter(format!(
                "Horizon of {} days runs past the end of the calendar",
                config.horizon_days
            )));
        }
        let summarizer = ForecastSummarizer::new(config.confidence_level)?;
        let estimator = GbmEstimator::new(config.trading_periods_per_year)?;

        let params = estimator.estimate_from_prices(series)?;
        let simulator = PathSimulator::new(
            last.close,
            params,
            config.horizon_days,
            estimator.periods_per_year(),
            config.trial_count,
        )?
        .with_parallel(config.parallel);

        let source = RandomSource::new(config.seed);
        info!(
            history = series.len(),
            horizon = config.horizon_days,
            trials = config.trial_count,
            seed = source.seed(),
            drift = params.drift(),
            volatility = params.volatility(),
            "running GBM forecast"
        );

        let ensemble = simulator.simulate(&source)?;
        let days = summarizer.summarize(&ensemble, &dates)?;
        debug!(rows = days.len(), "summarized ensemble");

        let t_years = config.horizon_days as f64 / f64::from(estimator.periods_per_year());
        let closed_form = DailyForecast {
            date: dates[dates.len() - 1],
            median: params.analytic_quantile(last.close, t_years, 0.5)?,
            lower: params.analytic_quantile(last.close, t_years, summarizer.lower_quantile())?,
            upper: params.analytic_quantile(last.close, t_years, summarizer.upper_quantile())?,
        };

        let result = ForecastResult {
            current_price: last.close,
            last_date: last.date,
            history_len: series.len(),
            params,
            periods_per_year: estimator.periods_per_year(),
            expected_annual_return: params.expected_annual_return(),
            trial_count: config.trial_count,
            seed: source.seed(),
            confidence_level: config.confidence_level,
            days,
            closed_form,
            paths: config.retain_paths.then_some(ensemble),
        };

        if let Some(final_day) = result.final_day() {
            info!(
                date = %final_day.date,
                median = final_day.median,
                lower = final_day.lower,
                upper = final_day.upper,
                "forecast complete"
            );
        }

        Ok(result)
    }
}

/// Forecast `series` with `config`; see [`Forecaster::forecast`]
pub fn forecast(series: &PriceSeries, config: &ForecastConfig) -> Result<ForecastResult> {
    Forecaster::new(config.clone())?.forecast(series)
}
