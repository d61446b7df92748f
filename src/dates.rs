//! Calendar-month arithmetic for rental periods.
//!
//! Month addition clamps to the last valid day of the target month
//! (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year) and never rolls
//! into the following month. Results outside chrono's representable range
//! saturate to `NaiveDate::MIN` / `NaiveDate::MAX`.

use chrono::{Datelike, NaiveDate};

use crate::errors::{LockerError, Result};

/// wire format for dates handed to and from the persistence layer
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// add calendar months to a date, clamping the day to the target month
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = total.div_euclid(12);
    let month = (total.rem_euclid(12) + 1) as u32;

    let saturated = if months >= 0 { NaiveDate::MAX } else { NaiveDate::MIN };
    let Ok(year) = i32::try_from(year) else {
        return saturated;
    };

    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(saturated)
}

/// whole-month difference, ignoring the day of month entirely
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// parse a `YYYY-MM-DD` date string
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| LockerError::InvalidDate {
        message: format!("{s:?}: {e}"),
    })
}

/// format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// string-in, string-out form of [`add_months`]
pub fn add_months_str(date: &str, months: i32) -> Result<String> {
    Ok(format_date(add_months(parse_date(date)?, months)))
}

/// string form of [`months_between`]
pub fn months_between_str(start: &str, end: &str) -> Result<i32> {
    Ok(months_between(parse_date(start)?, parse_date(end)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_end_clamping() {
        assert_eq!(add_months(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2025, 3, 31), 1), date(2025, 4, 30));
        assert_eq!(add_months(date(2025, 1, 15), 3), date(2025, 4, 15));

        // clamping does not stick: Jan 31 + 2 lands on Mar 31
        assert_eq!(add_months(date(2025, 1, 31), 2), date(2025, 3, 31));
    }

    #[test]
    fn test_year_rollover() {
        assert_eq!(add_months(date(2025, 11, 15), 3), date(2026, 2, 15));
        assert_eq!(add_months(date(2025, 12, 31), 2), date(2026, 2, 28));
        assert_eq!(add_months(date(2025, 1, 1), 12), date(2026, 1, 1));
        assert_eq!(add_months(date(2025, 6, 30), 30), date(2027, 12, 30));
    }

    #[test]
    fn test_negative_and_zero_months() {
        assert_eq!(add_months(date(2025, 3, 31), -1), date(2025, 2, 28));
        assert_eq!(add_months(date(2025, 1, 15), -1), date(2024, 12, 15));
        assert_eq!(add_months(date(2025, 1, 15), 0), date(2025, 1, 15));
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(add_months(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(add_months(NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(add_months(date(2025, 1, 1), i32::MAX), NaiveDate::MAX);
    }

    #[test]
    fn test_months_between_ignores_day() {
        assert_eq!(months_between(date(2025, 1, 31), date(2025, 2, 1)), 1);
        assert_eq!(months_between(date(2025, 1, 1), date(2026, 1, 1)), 12);
        assert_eq!(months_between(date(2025, 1, 1), date(2025, 1, 31)), 0);
        assert_eq!(months_between(date(2025, 3, 15), date(2025, 1, 15)), -2);
    }

    #[test]
    fn test_string_helpers() {
        assert_eq!(add_months_str("2025-01-31", 1).unwrap(), "2025-02-28");
        assert_eq!(add_months_str("2024-01-31", 1).unwrap(), "2024-02-29");
        assert_eq!(months_between_str("2025-01-31", "2025-02-01").unwrap(), 1);

        assert!(matches!(
            parse_date("2025-02-30"),
            Err(LockerError::InvalidDate { .. })
        ));
        assert!(parse_date("not a date").is_err());
        assert_eq!(format_date(date(2025, 4, 5)), "2025-04-05");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }
}
