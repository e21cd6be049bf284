// File: src/dom/mod.rs
// Purpose: Typed view of the form document the validators read and mutate

use portal_forms_validation::FileInfo;
use serde::Serialize;
use std::fmt;

pub mod memory;

pub use memory::{MemoryDom, NodeId};

/// Class of the text node holding a field's error message
pub const ERROR_CLASS: &str = "field-error";
/// Class toggled on a control that failed validation
pub const INVALID_CLASS: &str = "invalid";
/// Class of the notice appended to the form after a valid submission
pub const NOTICE_CLASS: &str = "form-success";
/// Class added to the parent of a decorated file input
pub const FILE_WRAP_CLASS: &str = "file-input-wrap";
/// Class of the cosmetic label layered over a file input
pub const FILE_BUTTON_CLASS: &str = "btn-file";

/// What sort of control a named element is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Select,
    TextArea,
    Checkbox,
    File,
}

/// Current value of a control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
    File(Option<FileInfo>),
}

impl FieldValue {
    /// Text content; empty for checkboxes, the file name for file inputs
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::File(Some(file)) => &file.name,
            FieldValue::Checked(_) | FieldValue::File(None) => "",
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Checked(true))
    }

    pub fn file(&self) -> Option<&FileInfo> {
        match self {
            FieldValue::File(file) => file.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Checked(checked) => write!(f, "{}", checked),
            other => f.write_str(other.as_text()),
        }
    }
}

/// Where the error node of a control lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPlacement {
    /// Inside the closest ancestor carrying `wrapper_class`, or the parent
    /// element when there is none
    Container { wrapper_class: String },
    /// Immediately after the control
    NextSibling,
}

impl ErrorPlacement {
    pub fn container(wrapper_class: impl Into<String>) -> Self {
        ErrorPlacement::Container {
            wrapper_class: wrapper_class.into(),
        }
    }
}

/// The document surface a form validator works against.
///
/// Implementations are handles onto one `<form>`: every lookup is scoped to
/// it. The document is the single source of truth; nothing read through this
/// trait is cached by the callers.
pub trait FormDom {
    type Node: Clone + PartialEq + fmt::Debug;

    /// Named control (input, select, textarea) inside the form
    fn control(&self, name: &str) -> Option<Self::Node>;

    /// All named controls, in document order
    fn controls(&self) -> Vec<Self::Node>;

    /// Named controls inside the element with the given id
    fn controls_within(&self, container_id: &str) -> Vec<Self::Node>;

    /// Element with the given id
    fn element(&self, id: &str) -> Option<Self::Node>;

    fn name_of(&self, node: &Self::Node) -> String;

    fn kind_of(&self, node: &Self::Node) -> ControlKind;

    fn read(&self, node: &Self::Node) -> FieldValue;

    /// Empty a control: text is cleared, checkboxes unchecked, files dropped
    fn clear_value(&mut self, node: &Self::Node);

    fn set_displayed(&mut self, node: &Self::Node, displayed: bool);

    /// Existing error node for `control`
    fn find_error_node(&self, control: &Self::Node, placement: &ErrorPlacement) -> Option<Self::Node>;

    /// Create the error node for `control`; `None` when the document refused
    fn create_error_node(&mut self, control: &Self::Node, placement: &ErrorPlacement) -> Option<Self::Node>;

    /// Every node carrying `class` inside the form
    fn nodes_with_class(&self, class: &str) -> Vec<Self::Node>;

    fn text(&self, node: &Self::Node) -> String;

    fn set_text(&mut self, node: &Self::Node, text: &str);

    fn set_class(&mut self, node: &Self::Node, class: &str, present: bool);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Find the form's notice node or append a new one, then set its text
    fn show_notice(&mut self, text: &str);

    fn focus(&mut self, node: &Self::Node);

    fn scroll_into_view(&mut self, node: &Self::Node);

    /// Layer a clickable label over a file input; a no-op when already done
    fn decorate_file_input(&mut self, control: &Self::Node, label: &str);
}
