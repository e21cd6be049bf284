// File: src/presenter.rs
// Purpose: Inline error messages and the invalid marker, shared by every form

use crate::dom::{ErrorPlacement, FormDom, ERROR_CLASS, INVALID_CLASS};

/// Renders and removes the error message shown next to a control.
///
/// Every field has at most one error node. Setting an error replaces its
/// text; clearing empties it but leaves the node in place.
#[derive(Debug, Clone)]
pub struct ErrorPresenter {
    placement: ErrorPlacement,
    overrides: Vec<(String, ErrorPlacement)>,
}

impl ErrorPresenter {
    pub fn new(placement: ErrorPlacement) -> Self {
        Self {
            placement,
            overrides: Vec::new(),
        }
    }

    /// Use a different placement for one field
    pub fn with_placement(mut self, field: impl Into<String>, placement: ErrorPlacement) -> Self {
        self.overrides.push((field.into(), placement));
        self
    }

    pub fn placement_for(&self, field: &str) -> &ErrorPlacement {
        self.overrides
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, placement)| placement)
            .unwrap_or(&self.placement)
    }

    /// Show `message` next to `field` and mark it invalid.
    ///
    /// Returns false when the form has no such control.
    pub fn set_error<D: FormDom>(&self, dom: &mut D, field: &str, message: &str) -> bool {
        let Some(control) = dom.control(field) else {
            tracing::warn!(field, "cannot show error for missing control");
            return false;
        };
        let placement = self.placement_for(field);
        let node = match dom.find_error_node(&control, placement) {
            Some(node) => Some(node),
            None => dom.create_error_node(&control, placement),
        };
        if let Some(node) = node {
            dom.set_text(&node, message);
        }
        dom.set_class(&control, INVALID_CLASS, true);
        true
    }

    /// Empty the error text of `field` and drop its invalid marker
    pub fn clear_error<D: FormDom>(&self, dom: &mut D, field: &str) {
        let Some(control) = dom.control(field) else {
            return;
        };
        if let Some(node) = dom.find_error_node(&control, self.placement_for(field)) {
            dom.set_text(&node, "");
        }
        dom.set_class(&control, INVALID_CLASS, false);
    }

    /// Message currently shown for `field`, if any
    pub fn message<D: FormDom>(&self, dom: &D, field: &str) -> Option<String> {
        let control = dom.control(field)?;
        dom.find_error_node(&control, self.placement_for(field))
            .map(|node| dom.text(&node))
            .filter(|text| !text.is_empty())
    }

    /// Empty every error node and drop every invalid marker in the form
    pub fn reset<D: FormDom>(&self, dom: &mut D) {
        for node in dom.nodes_with_class(ERROR_CLASS) {
            dom.set_text(&node, "");
        }
        for node in dom.nodes_with_class(INVALID_CLASS) {
            dom.set_class(&node, INVALID_CLASS, false);
        }
    }
}
