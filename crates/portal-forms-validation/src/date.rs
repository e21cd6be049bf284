//! Date validation functions

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Format produced by `<input type="date">`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a date input was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("To pole jest wymagane")]
    Required,
    #[error("Nieprawidłowa data")]
    Invalid,
    #[error("Data zakończenia nie może być wcześniejsza niż data rozpoczęcia")]
    EndBeforeStart,
}

/// Why a birth date was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BirthDateError {
    #[error("Podaj datę urodzenia")]
    Missing,
    #[error("Niepoprawna data")]
    Invalid,
    #[error("Data nie może być z przyszłości")]
    NotInPast,
    #[error("Musisz mieć co najmniej {0} lat")]
    TooYoung(i32),
}

/// Parses a calendar date in `YYYY-MM-DD` form
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Validates a date input.
///
/// Returns `Ok(None)` for an empty optional value and the parsed date
/// otherwise.
pub fn validate_date(value: &str, required: bool) -> Result<Option<NaiveDate>, DateError> {
    if value.trim().is_empty() {
        return if required {
            Err(DateError::Required)
        } else {
            Ok(None)
        };
    }
    parse_date(value).map(Some).ok_or(DateError::Invalid)
}

/// A range is ordered when the start is not after the end
pub fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), DateError> {
    if start > end {
        Err(DateError::EndBeforeStart)
    } else {
        Ok(())
    }
}

/// Age as the difference between calendar years.
///
/// Month and day are ignored, so someone whose birthday is later this year
/// is already counted as a year older.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth.year()
}

/// Validates a birth date: present, parseable, strictly in the past and at
/// least `min_age` years ago by year difference.
pub fn check_birth_date(value: &str, today: NaiveDate, min_age: i32) -> Result<NaiveDate, BirthDateError> {
    if value.trim().is_empty() {
        return Err(BirthDateError::Missing);
    }
    let birth = parse_date(value).ok_or(BirthDateError::Invalid)?;
    if birth >= today {
        return Err(BirthDateError::NotInPast);
    }
    if age_in_years(birth, today) < min_age {
        return Err(BirthDateError::TooYoung(min_age));
    }
    Ok(birth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29"), Some(day(2024, 2, 29)));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("29.02.2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(validate_date("", false), Ok(None));
        assert_eq!(validate_date("", true), Err(DateError::Required));
        assert_eq!(validate_date("2024-13-01", false), Err(DateError::Invalid));
        assert_eq!(validate_date("2024-05-01", false), Ok(Some(day(2024, 5, 1))));
    }

    #[test]
    fn test_date_order() {
        assert!(check_date_order(day(2024, 5, 1), day(2024, 5, 1)).is_ok());
        assert!(check_date_order(day(2024, 5, 1), day(2024, 5, 2)).is_ok());
        assert_eq!(
            check_date_order(day(2024, 5, 2), day(2024, 5, 1)),
            Err(DateError::EndBeforeStart)
        );
    }

    #[test]
    fn test_birth_date() {
        let today = day(2026, 10, 19);
        assert_eq!(check_birth_date("", today, 18), Err(BirthDateError::Missing));
        assert_eq!(check_birth_date("1990-02-30", today, 18), Err(BirthDateError::Invalid));
        assert_eq!(check_birth_date("2026-10-19", today, 18), Err(BirthDateError::NotInPast));
        assert_eq!(check_birth_date("2030-01-01", today, 18), Err(BirthDateError::NotInPast));
        assert_eq!(check_birth_date("2009-01-01", today, 18), Err(BirthDateError::TooYoung(18)));
        assert_eq!(check_birth_date("1990-06-15", today, 18), Ok(day(1990, 6, 15)));
    }

    #[test]
    fn test_birth_date_uses_year_difference() {
        // Turns 18 on 2026-10-20, already accepted the day before.
        let today = day(2026, 10, 19);
        assert!(check_birth_date("2008-10-20", today, 18).is_ok());
        assert!(check_birth_date("2008-12-31", today, 18).is_ok());
    }
}
