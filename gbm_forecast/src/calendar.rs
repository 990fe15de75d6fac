//! Forward trading calendar
//!
//! Forecast dates are business days following the last historical date.
//! Weekends are skipped; exchange holidays are not.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Whether a date falls on Monday through Friday
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first business day strictly after `date`
pub fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
    let mut current = date.checked_add_days(Days::new(1))?;
    while !is_business_day(current) {
        current = current.checked_add_days(Days::new(1))?;
    }
    Some(current)
}

/// `count` consecutive business days starting after `last_date`.
///
/// The result is shorter than `count` only if the calendar runs past
/// `NaiveDate::MAX`.
pub fn business_days_after(last_date: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut current = last_date;

    for _ in 0..count {
        match next_business_day(current) {
            Some(next) => {
                dates.push(next);
                current = next;
            }
            None => break,
        }
    }

    dates
}
