//! Numeric validation functions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configurable bounds for a numeric input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberRule {
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl Default for NumberRule {
    fn default() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
        }
    }
}

/// Why a numeric input was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("To pole jest wymagane i musi być liczbą")]
    Required,
    #[error("Minimalna wartość to {0}")]
    BelowMinimum(f64),
    #[error("Maksymalna wartość to {0}")]
    AboveMaximum(f64),
}

/// Validates a raw numeric input against a rule.
///
/// An empty value is only an error when the rule is required. A non-empty
/// value that does not parse to a finite number is reported as `Required`,
/// the same way a browser number input reports garbage as "no value".
pub fn validate_number(raw: &str, rule: &NumberRule) -> Result<Option<f64>, NumberError> {
    let raw = raw.trim();
    let value = if raw.is_empty() {
        None
    } else {
        raw.parse::<f64>().ok().filter(|v| v.is_finite())
    };

    let Some(value) = value else {
        if rule.required || !raw.is_empty() {
            return Err(NumberError::Required);
        }
        return Ok(None);
    };

    if let Some(min) = rule.min {
        validate_min(value, min).map_err(|_| NumberError::BelowMinimum(min))?;
    }
    if let Some(max) = rule.max {
        validate_max(value, max).map_err(|_| NumberError::AboveMaximum(max))?;
    }

    Ok(Some(value))
}

/// Validates minimum value for numeric types
pub fn validate_min<T: PartialOrd + core::fmt::Display>(value: T, min: T) -> Result<(), String> {
    if value >= min {
        Ok(())
    } else {
        Err(format!("Minimalna wartość to {}", min))
    }
}

/// Validates maximum value for numeric types
pub fn validate_max<T: PartialOrd + core::fmt::Display>(value: T, max: T) -> Result<(), String> {
    if value <= max {
        Ok(())
    } else {
        Err(format!("Maksymalna wartość to {}", max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        assert!(validate_min(10, 5).is_ok());
        assert!(validate_min(5, 5).is_ok());
        assert!(validate_min(3, 5).is_err());

        assert!(validate_max(99.9, 100.0).is_ok());
        assert!(validate_max(100.1, 100.0).is_err());
    }

    #[test]
    fn test_required_number() {
        let rule = NumberRule::default();
        assert_eq!(validate_number("", &rule), Err(NumberError::Required));
        assert_eq!(validate_number("abc", &rule), Err(NumberError::Required));
        assert_eq!(validate_number("4", &rule), Ok(Some(4.0)));
        for infinite in ["inf", "+inf", "-inf", "infinity", "NaN"] {
            assert_eq!(validate_number(infinite, &rule), Err(NumberError::Required), "{infinite}");
        }
    }

    #[test]
    fn test_optional_number() {
        let rule = NumberRule {
            required: false,
            min: Some(1.0),
            max: None,
        };
        assert_eq!(validate_number("", &rule), Ok(None));
        assert_eq!(validate_number("0", &rule), Err(NumberError::BelowMinimum(1.0)));
        assert_eq!(validate_number("inf", &rule), Err(NumberError::Required));
    }

    #[test]
    fn test_bounds_are_distinct() {
        let rule = NumberRule {
            required: true,
            min: Some(1.0),
            max: Some(20.0),
        };
        assert_eq!(validate_number("0", &rule), Err(NumberError::BelowMinimum(1.0)));
        assert_eq!(validate_number("21", &rule), Err(NumberError::AboveMaximum(20.0)));
        assert_eq!(
            NumberError::AboveMaximum(20.0).to_string(),
            "Maksymalna wartość to 20"
        );
    }
}
