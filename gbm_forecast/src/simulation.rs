//! Monte Carlo simulation of GBM price paths
//!
//! Each trial draws `H` increments `dW ~ N(0, 1/A)`, accumulates them into
//! `W_t` and evaluates the closed-form solution
//! `S_t = S_0 * exp((mu - sigma^2 / 2) * t / A + sigma * W_t)` for `t = 1..=H`.
//!
//! Trials are independent. Trial `i` draws from its own generator seeded
//! from the run seed and `i`, so a run gives the same ensemble whether the
//! trials execute serially or on the rayon pool.

use crate::error::{ForecastError, Result};
use crate::models::GbmParameters;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Odd 64-bit constant spacing the per-trial seeds
const SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Source of randomness for one forecast run.
///
/// Holds only a seed; each trial derives its own generator from it, so the
/// source can be shared across threads without synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSource {
    seed: u64,
}

impl RandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Draw a fresh seed from the thread-local OS-seeded generator
    pub fn from_entropy() -> Self {
        Self {
            seed: rand::thread_rng().gen(),
        }
    }

    /// Use `seed` when given, otherwise draw one
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }

    /// The seed this source was built from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent generator for trial `trial`
    pub fn trial_rng(&self, trial: usize) -> ChaCha8Rng {
        let trial_seed = self
            .seed
            .wrapping_add((trial as u64).wrapping_mul(SEED_STRIDE));
        ChaCha8Rng::seed_from_u64(trial_seed)
    }
}

/// Prices for forecast days `1..=H` of one trial
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPath {
    prices: Vec<f64>,
}

impl SimulatedPath {
    pub fn new(prices: Vec<f64>) -> Self {
        Self { prices }
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Price on forecast day `day` (1-based)
    pub fn price_at(&self, day: usize) -> Option<f64> {
        day.checked_sub(1).and_then(|i| self.prices.get(i)).copied()
    }

    pub fn final_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// All simulated paths of a run, each of the same length
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    horizon: usize,
    paths: Vec<SimulatedPath>,
}

impl PathEnsemble {
    /// Fails with [`ForecastError::InvalidInput`] if the paths differ in length
    pub fn new(paths: Vec<SimulatedPath>) -> Result<Self> {
        let horizon = paths.first().map_or(0, SimulatedPath::len);
        if let Some((i, p)) = paths.iter().enumerate().find(|(_, p)| p.len() != horizon) {
            return Err(ForecastError::InvalidInput(format!(
                "Path {} has {} prices, expected {}",
                i,
                p.len(),
                horizon
            )));
        }
        Ok(Self { horizon, paths })
    }

    pub fn paths(&self) -> &[SimulatedPath] {
        &self.paths
    }

    /// Number of days per path
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Number of paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Cross-section of all paths on forecast day `day` (1-based)
    pub fn prices_on_day(&self, day: usize) -> Option<Vec<f64>> {
        if day == 0 || day > self.horizon {
            return None;
        }
        self.paths.iter().map(|p| p.price_at(day)).collect()
    }

    /// Last price of every path
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.paths.iter().filter_map(SimulatedPath::final_price).collect()
    }
}

/// Generates GBM price paths from a starting price
#[derive(Debug, Clone)]
pub struct PathSimulator {
    start_price: f64,
    params: GbmParameters,
    horizon: usize,
    periods_per_year: u32,
    trial_count: usize,
    parallel: bool,
}

impl PathSimulator {
    pub fn new(
        start_price: f64,
        params: GbmParameters,
        horizon: usize,
        periods_per_year: u32,
        trial_count: usize,
    ) -> Result<Self> {
        if !(start_price.is_finite() && start_price > 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Starting price must be positive and finite, got {}",
                start_price
            )));
        }
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least one day".to_string(),
            ));
        }
        if trial_count == 0 {
            return Err(ForecastError::InvalidParameter(
                "Trial count must be greater than zero".to_string(),
            ));
        }
        if periods_per_year == 0 {
            return Err(ForecastError::InvalidParameter(
                "Trading periods per year must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            start_price,
            params,
            horizon,
            periods_per_year,
            trial_count,
            parallel: false,
        })
    }

    /// Run trials on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    /// Simulate every trial and collect the ensemble
    pub fn simulate(&self, source: &RandomSource) -> Result<PathEnsemble> {
        debug!(
            trials = self.trial_count,
            horizon = self.horizon,
            dt = 1.0 / f64::from(self.periods_per_year),
            parallel = self.parallel,
            "simulating GBM paths"
        );

        let paths = if self.parallel {
            (0..self.trial_count)
                .into_par_iter()
                .map(|trial| self.simulate_trial(&mut source.trial_rng(trial)))
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..self.trial_count)
                .map(|trial| self.simulate_trial(&mut source.trial_rng(trial)))
                .collect::<Result<Vec<_>>>()?
        };

        PathEnsemble::new(paths)
    }

    /// Simulate one path using draws from `rng`
    pub fn simulate_trial<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SimulatedPath> {
        let periods = f64::from(self.periods_per_year);
        let sqrt_dt = (1.0 / periods).sqrt();
        let growth = self.params.expected_annual_return();
        let sigma = self.params.volatility();

        let mut prices = Vec::with_capacity(self.horizon);
        let mut w = 0.0;
        for t in 1..=self.horizon {
            let z: f64 = StandardNormal.sample(rng);
            w += z * sqrt_dt;

            let price = self.start_price * (growth * t as f64 / periods + sigma * w).exp();
            if !(price.is_finite() && price > 0.0) {
                warn!(day = t, price, sigma, "simulated price out of range");
                return Err(ForecastError::NumericalError(format!(
                    "Simulated price on day {} is {}; volatility {} is too large for this horizon",
                    t, price, sigma
                )));
            }
            prices.push(price);
        }

        Ok(SimulatedPath::new(prices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(drift: f64, volatility: f64) -> GbmParameters {
        GbmParameters::new(drift, volatility).unwrap()
    }

    #[test]
    fn test_trial_rngs_differ() {
        let source = RandomSource::from_seed(7);
        let a: f64 = source.trial_rng(0).gen();
        let b: f64 = source.trial_rng(1).gen();
        assert_ne!(a, b);
        let again: f64 = source.trial_rng(0).gen();
        assert_eq!(a, again);
    }

    #[test]
    fn test_zero_volatility_is_deterministic_growth() {
        let sim = PathSimulator::new(100.0, params(0.252, 0.0), 3, 252, 2).unwrap();
        let ensemble = sim.simulate(&RandomSource::from_seed(1)).unwrap();

        for path in ensemble.paths() {
            for (i, &price) in path.prices().iter().enumerate() {
                let t = (i + 1) as f64;
                let expected = 100.0 * (0.252 * t / 252.0).exp();
                assert!((price - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_price_at_is_one_based() {
        let path = SimulatedPath::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(path.price_at(0), None);
        assert_eq!(path.price_at(1), Some(1.0));
        assert_eq!(path.price_at(3), Some(3.0));
        assert_eq!(path.price_at(4), None);
    }

    #[test]
    fn test_ensemble_rejects_ragged_paths() {
        let paths = vec![SimulatedPath::new(vec![1.0, 2.0]), SimulatedPath::new(vec![1.0])];
        assert!(PathEnsemble::new(paths).is_err());
    }

    #[test]
    fn test_overflow_is_reported() {
        let sim = PathSimulator::new(100.0, params(0.0, 1e6), 50, 252, 4).unwrap();
        let result = sim.simulate(&RandomSource::from_seed(3));
        assert!(matches!(result, Err(ForecastError::NumericalError(_))));
    }
}
