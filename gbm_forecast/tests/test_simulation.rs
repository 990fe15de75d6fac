use approx::assert_relative_eq;
use gbm_forecast::{ForecastError, GbmParameters, PathSimulator, RandomSource};
use rstest::rstest;

fn simulator(horizon: usize, trials: usize) -> PathSimulator {
    let params = GbmParameters::new(0.08, 0.25).unwrap();
    PathSimulator::new(100.0, params, horizon, 252, trials).unwrap()
}

#[rstest]
#[case(1, 1)]
#[case(5, 10)]
#[case(126, 200)]
fn test_ensemble_shape(#[case] horizon: usize, #[case] trials: usize) {
    let ensemble = simulator(horizon, trials)
        .simulate(&RandomSource::from_seed(42))
        .unwrap();

    assert_eq!(ensemble.len(), trials);
    assert_eq!(ensemble.horizon(), horizon);
    for path in ensemble.paths() {
        assert_eq!(path.len(), horizon);
        assert!(path.prices().iter().all(|&p| p.is_finite() && p > 0.0));
    }
}

#[test]
fn test_same_seed_same_ensemble() {
    let sim = simulator(20, 50);
    let first = sim.simulate(&RandomSource::from_seed(42)).unwrap();
    let second = sim.simulate(&RandomSource::from_seed(42)).unwrap();
    assert_eq!(first, second);

    let other = sim.simulate(&RandomSource::from_seed(43)).unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_parallel_matches_serial() {
    let source = RandomSource::from_seed(2024);
    let serial = simulator(30, 64).with_parallel(false).simulate(&source).unwrap();
    let parallel = simulator(30, 64).with_parallel(true).simulate(&source).unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn test_trials_are_not_identical() {
    let ensemble = simulator(10, 2).simulate(&RandomSource::from_seed(1)).unwrap();
    assert_ne!(ensemble.paths()[0], ensemble.paths()[1]);
}

#[test]
fn test_terminal_log_price_moments() {
    // ln(S_T / S_0) ~ N((mu - sigma^2 / 2) T, sigma^2 T) with T = 63 / 252
    let params = GbmParameters::new(0.1, 0.3).unwrap();
    let sim = PathSimulator::new(50.0, params, 63, 252, 20_000)
        .unwrap()
        .with_parallel(true);
    let ensemble = sim.simulate(&RandomSource::from_seed(99)).unwrap();

    let logs: Vec<f64> = ensemble
        .terminal_prices()
        .iter()
        .map(|p| (p / 50.0).ln())
        .collect();
    let t = 63.0 / 252.0;
    let mean = trade_math::mean(&logs).unwrap();
    let sd = trade_math::sample_std_dev(&logs).unwrap();

    assert_relative_eq!(mean, (0.1 - 0.045) * t, epsilon = 0.01);
    assert_relative_eq!(sd, 0.3 * t.sqrt(), max_relative = 0.03);
}

#[rstest]
#[case(0.0, 5, 10)]
#[case(-1.0, 5, 10)]
#[case(f64::NAN, 5, 10)]
#[case(100.0, 0, 10)]
#[case(100.0, 5, 0)]
fn test_invalid_simulator_parameters(
    #[case] start: f64,
    #[case] horizon: usize,
    #[case] trials: usize,
) {
    let params = GbmParameters::new(0.05, 0.2).unwrap();
    let result = PathSimulator::new(start, params, horizon, 252, trials);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}

#[test]
fn test_zero_periods_per_year_is_rejected() {
    let params = GbmParameters::new(0.05, 0.2).unwrap();
    let result = PathSimulator::new(100.0, params, 5, 0, 10);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}
