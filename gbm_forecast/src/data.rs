//! Historical price data handling

use crate::calendar::{business_days_after, is_business_day};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A single daily closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Chronological series of daily closing prices.
///
/// Dates are strictly increasing and every close is finite. Whether the
/// closes are positive and whether there are enough of them is left to the
/// return calculation, which reports those problems itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series from points already in chronological order
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if let Some(w) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(ForecastError::InvalidInput(format!(
                "Dates must be strictly increasing: {} is followed by {}",
                w[0].date, w[1].date
            )));
        }

        if let Some(p) = points.iter().find(|p| !p.close.is_finite()) {
            return Err(ForecastError::InvalidInput(format!(
                "Close price on {} is not a finite number",
                p.date
            )));
        }

        Ok(Self { points })
    }

    /// Build a series from closes, dating them on consecutive business days
    /// beginning at `start` (or the next business day if `start` falls on a weekend).
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Result<Self> {
        if closes.is_empty() {
            return Self::new(Vec::new());
        }

        let first = if is_business_day(start) {
            start
        } else {
            business_days_after(start, 1)
                .first()
                .copied()
                .ok_or_else(|| {
                    ForecastError::InvalidInput(format!("No business day after {}", start))
                })?
        };

        let mut dates = vec![first];
        dates.extend(business_days_after(first, closes.len() - 1));
        if dates.len() != closes.len() {
            return Err(ForecastError::InvalidInput(
                "Calendar overflow while dating closes".to_string(),
            ));
        }

        let points = dates
            .into_iter()
            .zip(closes.iter())
            .map(|(date, &close)| PricePoint::new(date, close))
            .collect();

        Self::new(points)
    }

    /// All points in chronological order
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices as a vector
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Dates as a vector
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Most recent point
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The most recent `n` points (the whole series if it is shorter)
    pub fn tail(&self, n: usize) -> Self {
        let start = self.points.len().saturating_sub(n);
        Self {
            points: self.points[start..].to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Data loader for historical price files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a price series from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a price series from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<PriceSeries> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let time_idx = Self::detect_time_column(&headers)?;
        let close_idx = Self::detect_close_column(&headers)?;

        let mut points = Vec::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            // header is line 1
            let line = row + 2;

            let date_field = record.get(time_idx).ok_or_else(|| {
                ForecastError::InvalidInput(format!("Line {}: missing date field", line))
            })?;
            let close_field = record.get(close_idx).ok_or_else(|| {
                ForecastError::InvalidInput(format!("Line {}: missing price field", line))
            })?;

            let date = parse_date(date_field).ok_or_else(|| {
                ForecastError::InvalidInput(format!(
                    "Line {}: cannot parse date '{}'",
                    line, date_field
                ))
            })?;
            let close = close_field.parse::<f64>().map_err(|e| {
                ForecastError::InvalidInput(format!(
                    "Line {}: cannot parse price '{}': {}",
                    line, close_field, e
                ))
            })?;

            points.push(PricePoint::new(date, close));
        }

        PriceSeries::new(points)
    }

    /// Detect the date/time column by header name
    fn detect_time_column(headers: &StringRecord) -> Result<usize> {
        headers
            .iter()
            .position(|name| {
                let lower = name.to_lowercase();
                lower.contains("date") || lower.contains("time")
            })
            .ok_or_else(|| ForecastError::InvalidInput("No date column found in data".to_string()))
    }

    /// Detect the closing price column, falling back to a generic price column
    fn detect_close_column(headers: &StringRecord) -> Result<usize> {
        let find = |needle: &str| {
            headers
                .iter()
                .position(|name| name.to_lowercase().contains(needle))
        };

        find("close").or_else(|| find("price")).ok_or_else(|| {
            ForecastError::InvalidInput("No close or price column found in data".to_string())
        })
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or an RFC 3339 timestamp into a date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
