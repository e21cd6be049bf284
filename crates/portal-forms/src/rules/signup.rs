// File: src/rules/signup.rs
// Purpose: Resident signup form rules

use super::{RuleContext, RuleSet};
use crate::snapshot::FormSnapshot;
use portal_forms_validation::{
    check_birth_date, check_email, is_valid_nip, is_valid_pesel, is_valid_phone, trimmed_len,
};

pub const PESEL: &str = "pesel";
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const PHONE: &str = "phone_number";
pub const EMAIL: &str = "email";
pub const BIRTH_DATE: &str = "birth_date";
pub const ADDRESS: &str = "reg_address";
pub const NIP: &str = "nip";
/// Checkbox confirming the user lives in the city
pub const IS_RESIDENT: &str = "isResident";

const FIELDS: &[&str] = &[
    PESEL, FIRST_NAME, LAST_NAME, PHONE, EMAIL, BIRTH_DATE, ADDRESS, NIP,
];

/// Rules of the signup form. Values are trimmed before every check.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignupRules;

fn ensure(ok: bool, message: &str) -> Result<(), String> {
    if ok {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

impl RuleSet for SignupRules {
    fn fields(&self, _ctx: &RuleContext<'_>) -> Vec<String> {
        FIELDS.iter().map(|f| f.to_string()).collect()
    }

    fn check(&self, field: &str, snapshot: &FormSnapshot, ctx: &RuleContext<'_>) -> Result<(), String> {
        let value = snapshot.trimmed(field);
        match field {
            PESEL => ensure(is_valid_pesel(value), "PESEL musi zawierać dokładnie 11 cyfr"),
            FIRST_NAME => ensure(trimmed_len(value) >= 2, "Imię musi mieć minimum 2 znaki"),
            LAST_NAME => ensure(trimmed_len(value) >= 2, "Nazwisko musi mieć minimum 2 znaki"),
            PHONE => ensure(is_valid_phone(value), "Numer telefonu nie jest poprawny"),
            EMAIL => check_email(value).map_err(|e| e.to_string()),
            BIRTH_DATE => check_birth_date(value, ctx.today, ctx.config.rules.min_age_years)
                .map(drop)
                .map_err(|e| e.to_string()),
            ADDRESS => ensure(trimmed_len(value) >= 5, "Adres jest za krótki"),
            NIP => ensure(value.is_empty() || is_valid_nip(value), "NIP musi mieć 10 cyfr"),
            _ => Ok(()),
        }
    }
}
