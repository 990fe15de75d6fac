use chrono::NaiveDate;
use gbm_forecast::{ForecastConfig, ForecastReport, Forecaster, PriceSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // One year of synthetic closes with a gentle uptrend and a weekly wobble
    let closes: Vec<f64> = (0..252)
        .map(|i| {
            let t = i as f64;
            100.0 * (0.0004 * t + 0.015 * (t / 5.0).sin()).exp()
        })
        .collect();
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).ok_or("invalid start date")?;
    let series = PriceSeries::from_closes(start, &closes)?;
    println!("Built {} daily closes ending {}", series.len(), series.dates()[series.len() - 1]);

    // Forecast the next six months with a fixed seed
    let config = ForecastConfig::new(126, 2000).with_seed(42);
    let result = Forecaster::new(config)?.forecast(&series)?;

    print!("{}", ForecastReport::new("DEMO", &result));

    // First week of the forecast
    for day in result.days().iter().take(5) {
        println!(
            "{}: median {:.2} [{:.2}, {:.2}]",
            day.date, day.median, day.lower, day.upper
        );
    }

    Ok(())
}
