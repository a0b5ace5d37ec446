//! Monday-anchored week arithmetic
//!
//! Weekday indices run Monday = 1 through Sunday = 7. Sunday is day 7, never day 0,
//! so a Sunday belongs to the week that started six days earlier.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::error::DomainError;

/// Weekday names indexed by `day_of_week - 1`
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Weekday index of a date, Monday = 1 ... Sunday = 7
#[inline]
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// Weekday index of today in local time
pub fn current_day_of_week() -> u8 {
    day_of_week(Local::now().date_naive())
}

/// Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(day_of_week(date)) - 1)
}

/// The 7 consecutive days starting at `start`
pub fn week_dates(start: NaiveDate) -> [NaiveDate; 7] {
    let mut dates = [start; 7];
    for (offset, slot) in (0_i64..).zip(dates.iter_mut()) {
        *slot = start + Duration::days(offset);
    }
    dates
}

/// Parse a `YYYY-MM-DD` calendar day
pub fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(s.to_string()))
}

/// Label like `Monday • Jan 01, 2024`
pub fn format_date_with_day(date: NaiveDate, day_of_week: u8) -> Result<String, DomainError> {
    let name = day_of_week
        .checked_sub(1)
        .and_then(|idx| DAY_NAMES.get(usize::from(idx)))
        .ok_or(DomainError::InvalidDayOfWeek(day_of_week))?;
    Ok(format!("{name} \u{2022} {}", date.format("%b %d, %Y")))
}
