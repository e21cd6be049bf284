//! Errors raised while wiring a form to a document.
//!
//! Validation failures are never errors; they are reported as
//! [`crate::FieldError`] values and rendered next to the field.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("unknown form kind: {0}")]
    UnknownForm(String),

    #[error("form element not found: #{0}")]
    FormNotFound(String),

    #[error("element #{0} is not a <form>")]
    NotAForm(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}
