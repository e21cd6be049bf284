//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

// local@domain with no whitespace and no extra '@'
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+$").expect("email shape pattern is valid")
});

/// Why an email address was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Podaj poprawny adres e-mail")]
    Malformed,
    #[error("E-mail nie może zaczynać ani kończyć się kropką")]
    EdgeDot,
    #[error("E-mail nie może zawierać podwójnych kropek")]
    ConsecutiveDots,
    #[error("Domena e-mail musi zawierać kropkę (np. example.com)")]
    DomainWithoutDot,
}

/// Checks an email address, reporting the first structural problem found.
///
/// Checks, in order:
/// - `local@domain` shape, no whitespace, exactly one `@`
/// - neither part starts or ends with `.`
/// - neither part contains `..`
/// - the domain contains at least one `.`
pub fn check_email(email: &str) -> Result<(), EmailError> {
    if !EMAIL_SHAPE.is_match(email) {
        return Err(EmailError::Malformed);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(EmailError::Malformed);
    };

    let edge_dot = |part: &str| part.starts_with('.') || part.ends_with('.');
    if edge_dot(local) || edge_dot(domain) {
        return Err(EmailError::EdgeDot);
    }

    if local.contains("..") || domain.contains("..") {
        return Err(EmailError::ConsecutiveDots);
    }

    if !domain.contains('.') {
        return Err(EmailError::DomainWithoutDot);
    }

    Ok(())
}

/// Validates basic email format
pub fn is_valid_email(email: &str) -> bool {
    check_email(email).is_ok()
}
