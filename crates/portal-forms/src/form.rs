// File: src/form.rs
// Purpose: One validator per form and the event bindings that drive it

use crate::clock::{Clock, SystemClock};
use crate::config::PortalConfig;
use crate::dom::{ControlKind, ErrorPlacement, FormDom};
use crate::error::MountError;
use crate::events::{Dispatch, EventBus, EventKind, FormEvent, SuccessAction, Target};
use crate::gate::SubmissionGate;
use crate::presenter::ErrorPresenter;
use crate::report::ValidationReport;
use crate::rules::{application, signup, ApplicationRules, LoginRules, RuleContext, RuleSet, SignupRules};
use crate::snapshot::FormSnapshot;
use crate::visibility::{ConditionalGroup, VisibilityController};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// The portal's forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Property registration request (`#applicationForm`)
    Application,
    /// Resident account signup (`#signupForm`)
    Signup,
    /// Resident login (`#loginForm`)
    Login,
    /// Staff login (`#staffForm`)
    StaffLogin,
}

impl FormKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FormKind::Application => "application",
            FormKind::Signup => "signup",
            FormKind::Login => "login",
            FormKind::StaffLogin => "staff",
        }
    }

    /// Id of the `<form>` element on the portal pages
    pub fn default_form_id(self) -> &'static str {
        match self {
            FormKind::Application => "applicationForm",
            FormKind::Signup => "signupForm",
            FormKind::Login => "loginForm",
            FormKind::StaffLogin => "staffForm",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = MountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "application" => Ok(FormKind::Application),
            "signup" => Ok(FormKind::Signup),
            "login" => Ok(FormKind::Login),
            "staff" => Ok(FormKind::StaffLogin),
            other => Err(MountError::UnknownForm(other.to_string())),
        }
    }
}

/// File input whose chosen file name is mirrored into another element
#[derive(Debug, Clone)]
struct FilePicker {
    input: &'static str,
    name_display: &'static str,
    label: &'static str,
}

/// Validation, conditional sections and error display for one form
pub struct FormValidator {
    kind: FormKind,
    rules: Box<dyn RuleSet>,
    visibility: VisibilityController,
    presenter: ErrorPresenter,
    gate: SubmissionGate,
    file_picker: Option<FilePicker>,
    config: Rc<PortalConfig>,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("kind", &self.kind)
            .field("groups", &self.visibility.groups().len())
            .finish()
    }
}

impl FormValidator {
    pub fn new(kind: FormKind, config: Rc<PortalConfig>) -> Self {
        match kind {
            FormKind::Application => Self::application(config),
            FormKind::Signup => Self::signup(config),
            FormKind::Login => Self::login(
                config,
                kind,
                "Zalogowano: {email} (to jest demo — nie wysyła danych)",
            ),
            FormKind::StaffLogin => {
                Self::login(config, kind, "Zalogowano jako pracownik (demo): {email}")
            }
        }
    }

    fn application(config: Rc<PortalConfig>) -> Self {
        Self {
            kind: FormKind::Application,
            rules: Box::new(ApplicationRules),
            visibility: VisibilityController::new(vec![
                ConditionalGroup::new("new_estate_fields", application::ESTATE, application::NEW_ESTATE),
                ConditionalGroup::new(
                    "new_est_attachment_field",
                    application::PROPERTY_TYPE,
                    application::APARTMENT,
                ),
            ]),
            presenter: ErrorPresenter::new(ErrorPlacement::container("field")),
            gate: SubmissionGate::new(
                "application",
                "Wniosek przygotowany. (Front-end-only demo)",
                SuccessAction::Notice,
            ),
            file_picker: Some(FilePicker {
                input: application::ATTACHMENT,
                name_display: "new_est_attachment_name",
                label: "Załącz plik",
            }),
            config,
            clock: Box::new(SystemClock),
        }
    }

    fn signup(config: Rc<PortalConfig>) -> Self {
        Self {
            kind: FormKind::Signup,
            rules: Box::new(SignupRules),
            visibility: VisibilityController::default(),
            presenter: ErrorPresenter::new(ErrorPlacement::NextSibling)
                .with_placement(signup::IS_RESIDENT, ErrorPlacement::container("checkbox-inline")),
            gate: SubmissionGate::new("signup", "Walidacja zakończona sukcesem!", SuccessAction::Submit)
                .require_checkbox(signup::IS_RESIDENT, "Musisz potwierdzić, że jesteś mieszkańcem"),
            file_picker: None,
            config,
            clock: Box::new(SystemClock),
        }
    }

    fn login(config: Rc<PortalConfig>, kind: FormKind, notice: &str) -> Self {
        Self {
            kind,
            rules: Box::new(LoginRules),
            visibility: VisibilityController::default(),
            presenter: ErrorPresenter::new(ErrorPlacement::container("field")),
            gate: SubmissionGate::new(kind.as_str(), notice, SuccessAction::Notice),
            file_picker: None,
            config,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the source of today's date
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn presenter(&self) -> &ErrorPresenter {
        &self.presenter
    }

    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    fn with_context<R>(&self, f: impl FnOnce(&RuleContext<'_>) -> R) -> R {
        let ctx = RuleContext {
            config: &self.config,
            today: self.clock.today(),
        };
        f(&ctx)
    }

    /// Failing fields of the form as it is now, without rendering anything
    pub fn validate<D: FormDom>(&self, dom: &D) -> ValidationReport {
        let snapshot = FormSnapshot::read(dom);
        self.with_context(|ctx| {
            self.gate
                .evaluate(dom, &snapshot, self.rules.as_ref(), &self.visibility, ctx)
        })
    }

    /// Run the rules of a single field. `None` when the field has no rules
    /// here or is inside a hidden group.
    pub fn validate_field<D: FormDom>(&self, dom: &D, field: &str) -> Option<Result<(), String>> {
        self.with_context(|ctx| {
            if !self.rules.fields(ctx).iter().any(|f| f == field)
                || !self.visibility.is_applicable(dom, field)
            {
                return None;
            }
            let snapshot = FormSnapshot::read(dom);
            Some(self.rules.check(field, &snapshot, ctx))
        })
    }

    /// Prepare the page and bind every handler.
    ///
    /// Conditional groups take the state implied by the loaded values and
    /// the file input gets its label. The returned bus is what the host feeds
    /// DOM events into.
    pub fn mount<D: FormDom + 'static>(self: Rc<Self>, dom: &mut D) -> EventBus<D> {
        self.with_context(|ctx| {
            for field in self.rules.fields(ctx) {
                if dom.control(&field).is_none() {
                    tracing::warn!(form = %self.kind, %field, "form has no control for field");
                }
            }
        });

        self.visibility.sync(dom, &self.presenter);
        if let Some(picker) = &self.file_picker {
            if let Some(input) = dom.control(picker.input) {
                dom.decorate_file_input(&input, picker.label);
            }
        }

        let mut bus = EventBus::new();

        let this = Rc::clone(&self);
        bus.on(EventKind::Input, Target::AnyControl, move |dom: &mut D, event| {
            this.on_input(dom, event)
        });

        if self.config.behavior.validate_on_blur {
            let this = Rc::clone(&self);
            bus.on(EventKind::Blur, Target::AnyControl, move |dom: &mut D, event| {
                this.on_blur(dom, event)
            });
        }

        for controller in self.visibility.controllers() {
            let this = Rc::clone(&self);
            bus.on(
                EventKind::Change,
                Target::Control(controller.to_string()),
                move |dom: &mut D, event| this.on_controller_change(dom, event),
            );
        }

        if let Some(picker) = &self.file_picker {
            let this = Rc::clone(&self);
            bus.on(
                EventKind::Change,
                Target::Control(picker.input.to_string()),
                move |dom: &mut D, event| this.on_file_change(dom, event),
            );
        }

        let this = Rc::clone(&self);
        bus.on(EventKind::Submit, Target::Form, move |dom: &mut D, _| this.on_submit(dom));

        tracing::debug!(form = %self.kind, bindings = bus.len(), "form mounted");
        bus
    }

    fn on_input<D: FormDom>(&self, dom: &mut D, event: &FormEvent) -> Dispatch {
        if let Some(field) = &event.target {
            self.presenter.clear_error(dom, field);
        }
        Dispatch::Continue
    }

    fn on_blur<D: FormDom>(&self, dom: &mut D, event: &FormEvent) -> Dispatch {
        let Some(field) = event.target.as_deref() else {
            return Dispatch::Continue;
        };
        let is_checkbox = dom
            .control(field)
            .is_some_and(|node| dom.kind_of(&node) == ControlKind::Checkbox);
        if is_checkbox {
            return Dispatch::Continue;
        }

        match self.validate_field(dom, field) {
            Some(Err(message)) => {
                tracing::debug!(form = %self.kind, field, %message, "field rejected on blur");
                self.presenter.set_error(dom, field, &message);
            }
            Some(Ok(())) => self.presenter.clear_error(dom, field),
            None => {}
        }
        Dispatch::Continue
    }

    fn on_controller_change<D: FormDom>(&self, dom: &mut D, event: &FormEvent) -> Dispatch {
        if let Some(controller) = &event.target {
            self.visibility.on_change(dom, &self.presenter, controller);
            // A hidden group may have emptied the file input.
            self.mirror_file_name(dom);
        }
        Dispatch::Continue
    }

    fn on_file_change<D: FormDom>(&self, dom: &mut D, _event: &FormEvent) -> Dispatch {
        if let Some(picker) = &self.file_picker {
            self.presenter.clear_error(dom, picker.input);
            self.mirror_file_name(dom);
        }
        Dispatch::Continue
    }

    /// Show the chosen file's name, or nothing when no file is chosen
    fn mirror_file_name<D: FormDom>(&self, dom: &mut D) {
        let Some(picker) = &self.file_picker else {
            return;
        };
        let file_name = dom
            .control(picker.input)
            .and_then(|node| dom.read(&node).file().map(|file| file.name.clone()))
            .unwrap_or_default();
        if let Some(display) = dom.element(picker.name_display) {
            dom.set_text(&display, &file_name);
        }
    }

    fn on_submit<D: FormDom>(&self, dom: &mut D) -> Dispatch {
        self.with_context(|ctx| {
            self.gate.submit(
                dom,
                self.rules.as_ref(),
                &self.visibility,
                &self.presenter,
                ctx,
            )
        })
    }
}
