//! Identifiers and contact numbers: PESEL, NIP, postal codes, phone numbers

use once_cell::sync::Lazy;
use regex::Regex;

static POSTAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{3}$").expect("postal code pattern is valid"));

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-\s]{9,}$").expect("phone pattern is valid"));

fn is_ascii_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Polish postal code, `DD-DDD`
pub fn is_valid_postal_code(value: &str) -> bool {
    POSTAL_CODE.is_match(value)
}

/// National identification number: exactly 11 decimal digits.
///
/// The checksum digit is not verified.
pub fn is_valid_pesel(value: &str) -> bool {
    is_ascii_digits(value, 11)
}

/// Tax identification number: exactly 10 decimal digits
pub fn is_valid_nip(value: &str) -> bool {
    is_ascii_digits(value, 10)
}

/// Digits, `+`, `-` and spaces, at least nine characters
pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}
