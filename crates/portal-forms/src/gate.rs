// File: src/gate.rs
// Purpose: Decide whether a form submission may proceed

use crate::dom::{FormDom, NOTICE_CLASS};
use crate::events::{Dispatch, SuccessAction};
use crate::presenter::ErrorPresenter;
use crate::report::{FieldError, ValidationReport};
use crate::rules::{RuleContext, RuleSet};
use crate::snapshot::FormSnapshot;
use crate::visibility::VisibilityController;

/// A checkbox that must be ticked before the form can be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredCheckbox {
    pub name: String,
    pub message: String,
}

/// Runs every applicable rule on submission and blocks or accepts it
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    form: String,
    notice: String,
    action: SuccessAction,
    checkbox: Option<RequiredCheckbox>,
}

impl SubmissionGate {
    /// `notice` may contain `{email}`, replaced with the submitted address
    pub fn new(form: impl Into<String>, notice: impl Into<String>, action: SuccessAction) -> Self {
        Self {
            form: form.into(),
            notice: notice.into(),
            action,
            checkbox: None,
        }
    }

    pub fn require_checkbox(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.checkbox = Some(RequiredCheckbox {
            name: name.into(),
            message: message.into(),
        });
        self
    }

    /// Failing fields for the current snapshot, without touching the page.
    ///
    /// Controls missing from the page and fields inside hidden groups are
    /// skipped.
    pub fn evaluate<D: FormDom>(
        &self,
        dom: &D,
        snapshot: &FormSnapshot,
        rules: &dyn RuleSet,
        visibility: &VisibilityController,
        ctx: &RuleContext<'_>,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();
        for field in rules.fields(ctx) {
            if !snapshot.contains(&field) || !visibility.is_applicable(dom, &field) {
                continue;
            }
            if let Err(message) = rules.check(&field, snapshot, ctx) {
                report.push(FieldError::new(field, message));
            }
        }

        if let Some(checkbox) = &self.checkbox {
            if !snapshot.is_checked(&checkbox.name) {
                report.push(FieldError::new(&checkbox.name, &checkbox.message));
            }
        }

        report
    }

    /// Handle a submission attempt.
    ///
    /// All previous errors and any earlier success notice are cleared first,
    /// so only the outcome of this attempt is shown. The default action is always cancelled; on success
    /// the notice is shown and the host decides what `action` means.
    pub fn submit<D: FormDom>(
        &self,
        dom: &mut D,
        rules: &dyn RuleSet,
        visibility: &VisibilityController,
        presenter: &ErrorPresenter,
        ctx: &RuleContext<'_>,
    ) -> Dispatch {
        presenter.reset(dom);
        for notice in dom.nodes_with_class(NOTICE_CLASS) {
            dom.set_text(&notice, "");
            dom.set_displayed(&notice, false);
        }

        let snapshot = FormSnapshot::read(dom);
        let report = self.evaluate(dom, &snapshot, rules, visibility, ctx);

        if !report.is_valid() {
            for error in report.errors() {
                presenter.set_error(dom, &error.field, &error.message);
            }
            if let Some(first) = first_in_document(dom, &report) {
                dom.scroll_into_view(&first);
                dom.focus(&first);
            }
            tracing::debug!(form = %self.form, errors = report.len(), "submission blocked");
            return Dispatch::Blocked;
        }

        let notice = self.notice.replace("{email}", snapshot.trimmed("email"));
        dom.show_notice(&notice);
        tracing::info!(form = %self.form, snapshot = %snapshot.to_json(), "submission accepted");

        Dispatch::Accepted {
            snapshot,
            action: self.action,
        }
    }
}

/// Failing control that comes first on the page
fn first_in_document<D: FormDom>(dom: &D, report: &ValidationReport) -> Option<D::Node> {
    dom.controls()
        .into_iter()
        .find(|node| report.error(&dom.name_of(node)).is_some())
}
