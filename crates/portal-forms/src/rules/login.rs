// File: src/rules/login.rs
// Purpose: Resident and staff login form rules

use super::{RuleContext, RuleSet};
use crate::snapshot::FormSnapshot;
use portal_forms_validation::check_email;

pub const EMAIL: &str = "email";

/// Rules of the login forms: only the e-mail address is checked
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginRules;

impl RuleSet for LoginRules {
    fn fields(&self, _ctx: &RuleContext<'_>) -> Vec<String> {
        vec![EMAIL.to_string()]
    }

    fn check(&self, field: &str, snapshot: &FormSnapshot, _ctx: &RuleContext<'_>) -> Result<(), String> {
        match field {
            EMAIL => check_email(snapshot.trimmed(field)).map_err(|e| e.to_string()),
            _ => Ok(()),
        }
    }
}
