use chrono::NaiveDate;
use gbm_forecast::data::{DataLoader, PricePoint, PriceSeries};
use gbm_forecast::ForecastError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_data_loader_from_csv() {
    // Create a temporary CSV file
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,open,high,low,close,volume").unwrap();
    writeln!(file, "2023-01-03,100.0,105.0,98.0,103.0,1000").unwrap();
    writeln!(file, "2023-01-04,103.0,107.0,101.0,106.0,1200").unwrap();
    writeln!(file, "2023-01-05,106.0,110.0,104.0,108.0,1500").unwrap();

    let data = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data.closes(), vec![103.0, 106.0, 108.0]);
    assert_eq!(data.last().unwrap().date, date(2023, 1, 5));
}

#[test]
fn test_data_loader_price_column_fallback() {
    let csv = "Timestamp,Price\n2023-01-03T16:00:00Z,10.5\n2023-01-04T16:00:00Z,11.0\n";
    let data = DataLoader::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(data.closes(), vec![10.5, 11.0]);
    assert_eq!(data.dates(), vec![date(2023, 1, 3), date(2023, 1, 4)]);
}

#[test]
fn test_data_loader_error_handling() {
    // Non-existent file
    let result = DataLoader::from_csv("nonexistent_file.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));

    // No recognizable columns
    let result = DataLoader::from_reader("invalid,csv,format\n1,2,3\n".as_bytes());
    assert!(matches!(result, Err(ForecastError::InvalidInput(_))));

    // Unparsable price
    let result = DataLoader::from_reader("date,close\n2023-01-03,abc\n".as_bytes());
    assert!(matches!(result, Err(ForecastError::InvalidInput(_))));

    // Out of order dates
    let result =
        DataLoader::from_reader("date,close\n2023-01-04,1.0\n2023-01-03,2.0\n".as_bytes());
    assert!(matches!(result, Err(ForecastError::InvalidInput(_))));
}

#[test]
fn test_price_series_rejects_duplicate_dates() {
    let points = vec![
        PricePoint::new(date(2023, 1, 3), 100.0),
        PricePoint::new(date(2023, 1, 3), 101.0),
    ];
    assert!(PriceSeries::new(points).is_err());
}

#[test]
fn test_from_closes_uses_business_days() {
    // 2023-01-07 is a Saturday
    let series = PriceSeries::from_closes(date(2023, 1, 7), &[1.0, 2.0, 3.0]).unwrap();

    assert_eq!(
        series.dates(),
        vec![date(2023, 1, 9), date(2023, 1, 10), date(2023, 1, 11)]
    );
}

#[test]
fn test_non_positive_prices_are_accepted_until_forecast() {
    // Positivity is checked by the return calculation, not the container
    let series = PriceSeries::from_closes(date(2023, 1, 2), &[100.0, -5.0, 99.0]).unwrap();
    assert_eq!(series.len(), 3);
}
