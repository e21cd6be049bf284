// File: src/visibility.rs
// Purpose: Conditional sections shown or hidden by a controlling select

use crate::dom::FormDom;
use crate::presenter::ErrorPresenter;

/// Display state of a conditional group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    Shown,
    Hidden,
}

/// Controls inside `container` that are only relevant while `controller`
/// holds `shown_when`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalGroup {
    pub container: String,
    pub controller: String,
    pub shown_when: String,
}

impl ConditionalGroup {
    pub fn new(
        container: impl Into<String>,
        controller: impl Into<String>,
        shown_when: impl Into<String>,
    ) -> Self {
        Self {
            container: container.into(),
            controller: controller.into(),
            shown_when: shown_when.into(),
        }
    }
}

/// Shows and hides conditional groups.
///
/// A group's state is always derived from its controller's current value;
/// the controller itself may sit inside another group, in which case the
/// inner group is only shown while the outer one is.
#[derive(Debug, Clone, Default)]
pub struct VisibilityController {
    groups: Vec<ConditionalGroup>,
}

impl VisibilityController {
    pub fn new(groups: Vec<ConditionalGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[ConditionalGroup] {
        &self.groups
    }

    /// Names of the fields that control a group
    pub fn controllers(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.controller.as_str())
    }

    /// Whether `field` is inside `group`'s container
    fn contains<D: FormDom>(dom: &D, group: &ConditionalGroup, field: &str) -> bool {
        dom.controls_within(&group.container)
            .iter()
            .any(|node| dom.name_of(node) == field)
    }

    /// State a group should be in given the document's current values
    pub fn state<D: FormDom>(&self, dom: &D, group: &ConditionalGroup) -> GroupState {
        let selected = dom
            .control(&group.controller)
            .map(|node| dom.read(&node).as_text().to_string())
            .unwrap_or_default();
        if selected == group.shown_when && self.is_applicable(dom, &group.controller) {
            GroupState::Shown
        } else {
            GroupState::Hidden
        }
    }

    /// A field takes part in validation unless a group containing it is hidden
    pub fn is_applicable<D: FormDom>(&self, dom: &D, field: &str) -> bool {
        self.groups
            .iter()
            .filter(|group| group.controller != field && Self::contains(dom, group, field))
            .all(|group| self.state(dom, group) == GroupState::Shown)
    }

    /// Apply the current state of every group, outermost first
    pub fn sync<D: FormDom>(&self, dom: &mut D, presenter: &ErrorPresenter) {
        for group in &self.groups {
            self.apply(dom, presenter, group);
        }
    }

    /// React to a change of `controller`.
    ///
    /// Hiding a group empties its controls, which may hide groups nested in
    /// it; those are re-applied as well.
    pub fn on_change<D: FormDom>(&self, dom: &mut D, presenter: &ErrorPresenter, controller: &str) {
        let mut pending = vec![controller.to_string()];
        while let Some(changed) = pending.pop() {
            for group in self.groups.iter().filter(|g| g.controller == changed) {
                if self.apply(dom, presenter, group) == GroupState::Hidden {
                    pending.extend(
                        self.groups
                            .iter()
                            .filter(|inner| Self::contains(dom, group, &inner.controller))
                            .map(|inner| inner.controller.clone()),
                    );
                }
            }
        }
    }

    fn apply<D: FormDom>(
        &self,
        dom: &mut D,
        presenter: &ErrorPresenter,
        group: &ConditionalGroup,
    ) -> GroupState {
        let state = self.state(dom, group);
        let Some(container) = dom.element(&group.container) else {
            return state;
        };

        match state {
            GroupState::Shown => dom.set_displayed(&container, true),
            GroupState::Hidden => {
                dom.set_displayed(&container, false);
                for control in dom.controls_within(&group.container) {
                    dom.clear_value(&control);
                    let name = dom.name_of(&control);
                    presenter.clear_error(dom, &name);
                }
            }
        }

        tracing::debug!(container = %group.container, ?state, "conditional group applied");
        state
    }
}
