//! Presentation and persistence mappings for forecast results

use crate::error::Result;
use crate::forecast::ForecastResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Roughly 21 trading days per calendar month
const TRADING_DAYS_PER_MONTH: f64 = 21.0;

/// One stored forecast row: `(ticker, date, median, lower, upper)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub ticker: String,
    pub date: NaiveDate,
    pub median: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ForecastResult {
    /// Flatten the per-day forecast into storage rows for `ticker`
    pub fn to_rows(&self, ticker: &str) -> Vec<ForecastRow> {
        self.days()
            .iter()
            .map(|day| ForecastRow {
                ticker: ticker.to_string(),
                date: day.date,
                median: day.median,
                lower: day.lower,
                upper: day.upper,
            })
            .collect()
    }
}

/// Write rows as CSV with a header line
pub fn write_rows_csv<W: Write>(writer: W, rows: &[ForecastRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Console summary of a forecast
#[derive(Debug, Clone)]
pub struct ForecastReport<'a> {
    ticker: &'a str,
    result: &'a ForecastResult,
}

impl<'a> ForecastReport<'a> {
    pub fn new(ticker: &'a str, result: &'a ForecastResult) -> Self {
        Self { ticker, result }
    }

    /// Percentage change from the current price to `price`
    fn change_pct(&self, price: f64) -> f64 {
        (price / self.result.current_price() - 1.0) * 100.0
    }
}

impl fmt::Display for ForecastReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        let rule = "=".repeat(60);

        writeln!(f, "{}", rule)?;
        writeln!(f, " {} FORECAST RESULTS", self.ticker)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Current price:               ${:.2}", r.current_price())?;
        writeln!(f, "Data used:                   Last {} trading days", r.history_len())?;
        writeln!(
            f,
            "Estimated annual drift (mu): {:.4} ({:.2}%)",
            r.drift(),
            r.drift() * 100.0
        )?;
        writeln!(
            f,
            "Estimated volatility (sigma): {:.4} ({:.2}%)",
            r.volatility(),
            r.volatility() * 100.0
        )?;

        if let Some(last) = r.final_day() {
            writeln!(f)?;
            writeln!(
                f,
                "Forecast for {} trading days (~{:.1} months):",
                r.horizon(),
                r.horizon() as f64 / TRADING_DAYS_PER_MONTH
            )?;
            writeln!(f, "  Median price:              ${:.2}", last.median)?;
            writeln!(f, "    Expected change:         {:+.1}%", self.change_pct(last.median))?;
            writeln!(
                f,
                "  {:.0}% Confidence Interval:   ${:.2} to ${:.2}",
                r.confidence_level() * 100.0,
                last.lower,
                last.upper
            )?;
            writeln!(
                f,
                "    Range:                   {:+.1}% to {:+.1}%",
                self.change_pct(last.lower),
                self.change_pct(last.upper)
            )?;

            let closed = r.closed_form_final_day();
            writeln!(
                f,
                "  Closed-form (t = {}/{}):    median ${:.2}, ${:.2} to ${:.2}",
                r.horizon(),
                r.periods_per_year(),
                closed.median,
                closed.lower,
                closed.upper
            )?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Expected annual return (mu - 0.5 sigma^2): {:.2}%",
            r.expected_annual_return() * 100.0
        )?;
        writeln!(f, "{}", rule)?;
        Ok(())
    }
}

/// Serialize a result as pretty JSON
pub fn to_json(result: &ForecastResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
