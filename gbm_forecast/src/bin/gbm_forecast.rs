//! gbm-forecast CLI: forecast a price history from a CSV file.

use clap::Parser;
use gbm_forecast::{
    report, DataLoader, ForecastConfig, ForecastReport, Forecaster, HistoryWindow,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gbm-forecast")]
#[command(about = "Forecast daily stock prices with a Geometric Brownian Motion model")]
#[command(version)]
struct Cli {
    /// CSV file with a date column and a close (or price) column
    #[arg(short, long)]
    input: PathBuf,

    /// Label used in the report and output rows
    #[arg(short, long, default_value = "TICKER")]
    ticker: String,

    /// JSON config file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of trading days to forecast
    #[arg(long)]
    horizon: Option<usize>,

    /// Number of simulated paths
    #[arg(long)]
    trials: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Trading periods per year used for annualization
    #[arg(long)]
    periods_per_year: Option<u32>,

    /// Width of the forecast band, e.g. 0.95
    #[arg(long)]
    confidence: Option<f64>,

    /// Use only this many of the most recent prices
    #[arg(long, default_value_t = HistoryWindow::default().lookback)]
    lookback: usize,

    /// Minimum number of prices required to forecast
    #[arg(long, default_value_t = HistoryWindow::default().min_history)]
    min_history: usize,

    /// Write forecast rows to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the full result as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Simulate on the current thread only
    #[arg(long)]
    serial: bool,
}

impl Cli {
    fn forecast_config(&self) -> gbm_forecast::Result<ForecastConfig> {
        let mut config = match &self.config {
            Some(path) => ForecastConfig::from_json_file(path)?,
            None => ForecastConfig::default(),
        };

        if let Some(horizon) = self.horizon {
            config.horizon_days = horizon;
        }
        if let Some(trials) = self.trials {
            config.trial_count = trials;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(periods) = self.periods_per_year {
            config.trading_periods_per_year = periods;
        }
        if let Some(confidence) = self.confidence {
            config.confidence_level = confidence;
        }
        if self.serial {
            config.parallel = false;
        }

        Ok(config)
    }

    fn history_window(&self) -> HistoryWindow {
        HistoryWindow {
            lookback: self.lookback,
            min_history: self.min_history,
        }
    }
}

fn run(cli: &Cli) -> gbm_forecast::Result<()> {
    let config = cli.forecast_config()?;
    let window = cli.history_window();

    let history = DataLoader::from_csv(&cli.input)?;
    info!(path = %cli.input.display(), prices = history.len(), "loaded price history");

    let series = window.apply(&history)?;
    info!(prices = series.len(), "applied history window");

    let result = Forecaster::new(config)?.forecast(&series)?;

    if cli.json {
        println!("{}", report::to_json(&result)?);
    } else {
        print!("{}", ForecastReport::new(&cli.ticker, &result));
    }

    if let Some(path) = &cli.output {
        let file = File::create(path)?;
        report::write_rows_csv(BufWriter::new(file), &result.to_rows(&cli.ticker))?;
        info!(path = %path.display(), rows = result.horizon(), "wrote forecast rows");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
