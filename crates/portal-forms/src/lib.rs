// Portal-Forms - client-side form engine for the resident portal
// Conditional sections, per-field rules and inline error messages

pub mod clock;
pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod form;
pub mod gate;
pub mod presenter;
pub mod report;
pub mod rules;
pub mod snapshot;
pub mod visibility;

// Re-export framework types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{BehaviorConfig, Districts, NumericField, PortalConfig, RulesConfig};
pub use dom::{ControlKind, ErrorPlacement, FieldValue, FormDom, MemoryDom};
pub use error::MountError;
pub use events::{Dispatch, EventBus, EventKind, FormEvent, SuccessAction, Target};
pub use form::{FormKind, FormValidator};
pub use gate::{RequiredCheckbox, SubmissionGate};
pub use presenter::ErrorPresenter;
pub use report::{FieldError, ValidationReport};
pub use rules::{RuleContext, RuleSet};
pub use snapshot::FormSnapshot;
pub use visibility::{ConditionalGroup, GroupState, VisibilityController};

// Re-export the pure validators
pub use portal_forms_validation as validation;
