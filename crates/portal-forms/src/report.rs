// File: src/report.rs
// Purpose: Outcome of running a rule set over a form

use serde::Serialize;

/// A field that failed validation and the message to show next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failing fields in the order the rule set checks them.
///
/// Each field appears at most once: the first failing rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure unless the field already failed
    pub fn push(&mut self, error: FieldError) {
        if self.error(&error.field).is_none() {
            self.errors.push(error);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for a specific field
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// First failing field in check order
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
