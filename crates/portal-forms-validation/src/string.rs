//! String validation functions
//!
//! Lengths are counted in characters of the trimmed value, so Polish
//! diacritics count once and surrounding whitespace never satisfies a rule.

/// Number of characters in the trimmed value
pub fn trimmed_len(s: &str) -> usize {
    s.trim().chars().count()
}

/// Value must contain something other than whitespace
pub fn validate_required(s: &str) -> Result<(), String> {
    if s.trim().is_empty() {
        Err("To pole jest wymagane".to_string())
    } else {
        Ok(())
    }
}

/// Validates minimum trimmed length
pub fn validate_min_length(s: &str, min: usize) -> Result<(), String> {
    if trimmed_len(s) >= min {
        Ok(())
    } else {
        Err(format!("Minimalna długość to {} znaków", min))
    }
}

/// Validates maximum trimmed length
pub fn validate_max_length(s: &str, max: usize) -> Result<(), String> {
    if trimmed_len(s) <= max {
        Ok(())
    } else {
        Err(format!("Maksymalna długość to {} znaków", max))
    }
}

/// Enum/value restriction
pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(validate_required("x").is_ok());
        assert!(validate_required("").is_err());
        assert!(validate_required("   ").is_err());
    }

    #[test]
    fn test_length_validators() {
        assert!(validate_min_length("Jo", 2).is_ok());
        assert!(validate_min_length(" J ", 2).is_err());
        assert!(validate_min_length("Łę", 2).is_ok());

        assert!(validate_max_length("hello", 10).is_ok());
        assert!(validate_max_length("verylongstring", 5).is_err());
        assert!(validate_max_length("  abc  ", 3).is_ok());
    }

    #[test]
    fn test_length_messages() {
        assert_eq!(
            validate_max_length("abcdef", 5).unwrap_err(),
            "Maksymalna długość to 5 znaków"
        );
    }

    #[test]
    fn test_enum_variant() {
        let allowed = &["mieszkanie", "dom"];
        assert!(is_one_of("dom", allowed));
        assert!(!is_one_of("Dom", allowed));
        assert!(!is_one_of("", allowed));
    }
}
