// File: src/rules/mod.rs
// Purpose: Per-form rule sets mapping field values to error messages

use crate::config::PortalConfig;
use crate::snapshot::FormSnapshot;
use chrono::NaiveDate;

pub mod application;
pub mod login;
pub mod signup;

pub use application::ApplicationRules;
pub use login::LoginRules;
pub use signup::SignupRules;

/// Everything a rule may consult besides the form's own values
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub config: &'a PortalConfig,
    pub today: NaiveDate,
}

/// The validation rules of one form.
///
/// Rules are pure: the same snapshot always yields the same answer, and
/// nothing is remembered between calls.
pub trait RuleSet {
    /// Fields checked on submission, in check order
    fn fields(&self, ctx: &RuleContext<'_>) -> Vec<String>;

    /// First failing rule for `field`. Fields without rules pass.
    fn check(&self, field: &str, snapshot: &FormSnapshot, ctx: &RuleContext<'_>) -> Result<(), String>;
}
