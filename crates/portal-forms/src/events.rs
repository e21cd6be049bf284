// File: src/events.rs
// Purpose: Typed form events and a synchronous dispatcher

use crate::snapshot::FormSnapshot;
use std::cell::Cell;
use std::fmt;

/// DOM events the validators listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `input`: the user edited a control
    Input,
    /// `change`: a select, checkbox or file input committed a new value
    Change,
    /// `blur`: a control lost focus
    Blur,
    /// `submit`: the form is being submitted
    Submit,
}

impl EventKind {
    /// DOM event type name
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Blur => "blur",
            EventKind::Submit => "submit",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event fired at the form or one of its named controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEvent {
    pub kind: EventKind,
    /// Name of the control, `None` for events on the form itself
    pub target: Option<String>,
}

impl FormEvent {
    pub fn on_control(kind: EventKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            target: Some(name.into()),
        }
    }

    pub fn input(name: impl Into<String>) -> Self {
        Self::on_control(EventKind::Input, name)
    }

    pub fn change(name: impl Into<String>) -> Self {
        Self::on_control(EventKind::Change, name)
    }

    pub fn blur(name: impl Into<String>) -> Self {
        Self::on_control(EventKind::Blur, name)
    }

    pub fn submit() -> Self {
        Self {
            kind: EventKind::Submit,
            target: None,
        }
    }
}

/// Which events a binding receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Form,
    AnyControl,
    Control(String),
}

impl Target {
    fn matches(&self, event: &FormEvent) -> bool {
        match (self, event.target.as_deref()) {
            (Target::Form, None) => true,
            (Target::AnyControl, Some(_)) => true,
            (Target::Control(name), Some(target)) => name == target,
            _ => false,
        }
    }
}

/// What a submission handler decided about an accepted form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessAction {
    /// Only show the success notice
    Notice,
    /// Show the notice and let the host submit the form for real
    Submit,
}

/// Result of dispatching one event
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dispatch {
    /// Let the browser run its default action
    #[default]
    Continue,
    /// Submission refused; at least one field is marked
    Blocked,
    /// Submission accepted; the default action is still cancelled and the
    /// host performs `action`
    Accepted {
        snapshot: FormSnapshot,
        action: SuccessAction,
    },
}

impl Dispatch {
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Dispatch::Continue)
    }

    fn merge(self, next: Dispatch) -> Dispatch {
        match next {
            Dispatch::Continue => self,
            decided => decided,
        }
    }
}

type Handler<D> = Box<dyn Fn(&mut D, &FormEvent) -> Dispatch>;

struct Binding<D> {
    kind: EventKind,
    target: Target,
    handler: Handler<D>,
}

/// Routes form events to registered handlers.
///
/// Handlers run synchronously, in registration order, and to completion. An
/// event raised while another is being dispatched (for instance the `blur`
/// a browser fires when a handler moves focus) is dropped.
pub struct EventBus<D> {
    bindings: Vec<Binding<D>>,
    dispatching: Cell<bool>,
}

impl<D> Default for EventBus<D> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
            dispatching: Cell::new(false),
        }
    }
}

impl<D> fmt::Debug for EventBus<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl<D> EventBus<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind` events on `target`
    pub fn on<F>(&mut self, kind: EventKind, target: Target, handler: F)
    where
        F: Fn(&mut D, &FormEvent) -> Dispatch + 'static,
    {
        self.bindings.push(Binding {
            kind,
            target,
            handler: Box::new(handler),
        });
    }

    /// Event kinds with at least one binding, in first-registration order
    pub fn kinds(&self) -> Vec<EventKind> {
        let mut kinds = Vec::new();
        for binding in &self.bindings {
            if !kinds.contains(&binding.kind) {
                kinds.push(binding.kind);
            }
        }
        kinds
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Run every handler bound to the event
    pub fn dispatch(&self, dom: &mut D, event: &FormEvent) -> Dispatch {
        if self.dispatching.replace(true) {
            tracing::debug!(kind = %event.kind, target = ?event.target, "dropping reentrant event");
            return Dispatch::Continue;
        }

        let mut outcome = Dispatch::Continue;
        for binding in &self.bindings {
            if binding.kind == event.kind && binding.target.matches(event) {
                outcome = outcome.merge((binding.handler)(dom, event));
            }
        }

        self.dispatching.set(false);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_matches_kind_and_target() {
        let mut bus: EventBus<Vec<String>> = EventBus::new();
        bus.on(EventKind::Input, Target::AnyControl, |log, event| {
            log.push(format!("any:{}", event.target.as_deref().unwrap_or("")));
            Dispatch::Continue
        });
        bus.on(EventKind::Change, Target::Control("id_estate".into()), |log, _| {
            log.push("estate".into());
            Dispatch::Continue
        });
        bus.on(EventKind::Submit, Target::Form, |log, _| {
            log.push("submit".into());
            Dispatch::Blocked
        });

        let mut log = Vec::new();
        assert_eq!(bus.dispatch(&mut log, &FormEvent::input("notes")), Dispatch::Continue);
        bus.dispatch(&mut log, &FormEvent::change("notes"));
        bus.dispatch(&mut log, &FormEvent::change("id_estate"));
        assert_eq!(bus.dispatch(&mut log, &FormEvent::submit()), Dispatch::Blocked);

        assert_eq!(log, vec!["any:notes", "estate", "submit"]);
        assert_eq!(
            bus.kinds(),
            vec![EventKind::Input, EventKind::Change, EventKind::Submit]
        );
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let mut bus: EventBus<Vec<u8>> = EventBus::new();
        bus.on(EventKind::Blur, Target::AnyControl, |log, _| {
            log.push(1);
            Dispatch::Continue
        });
        bus.on(EventKind::Blur, Target::Control("email".into()), |log, _| {
            log.push(2);
            Dispatch::Continue
        });

        let mut log = Vec::new();
        bus.dispatch(&mut log, &FormEvent::blur("email"));
        assert_eq!(log, vec![1, 2]);
    }

    #[test]
    fn test_reentrant_dispatch_is_dropped() {
        let bus: Rc<std::cell::RefCell<Option<Rc<EventBus<u32>>>>> = Rc::default();
        let mut inner = EventBus::new();
        let handle = Rc::clone(&bus);
        inner.on(EventKind::Submit, Target::Form, move |count: &mut u32, _| {
            *count += 1;
            if let Some(bus) = handle.borrow().as_ref() {
                assert_eq!(bus.dispatch(count, &FormEvent::submit()), Dispatch::Continue);
            }
            Dispatch::Blocked
        });
        let inner = Rc::new(inner);
        *bus.borrow_mut() = Some(Rc::clone(&inner));

        let mut count = 0;
        assert_eq!(inner.dispatch(&mut count, &FormEvent::submit()), Dispatch::Blocked);
        assert_eq!(count, 1);

        // The guard is released afterwards.
        inner.dispatch(&mut count, &FormEvent::submit());
        assert_eq!(count, 2);
    }
}
