// File: src/dom/memory.rs
// Purpose: In-memory form document used off-browser and in tests

use super::{
    ControlKind, ErrorPlacement, FieldValue, FormDom, ERROR_CLASS, FILE_BUTTON_CLASS,
    FILE_WRAP_CLASS, INVALID_CLASS, NOTICE_CLASS,
};
use portal_forms_validation::FileInfo;
use std::collections::BTreeSet;

/// Handle to a node of a [`MemoryDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum Role {
    Element,
    Control(ControlKind),
}

#[derive(Debug, Clone)]
struct Node {
    role: Role,
    id: Option<String>,
    name: Option<String>,
    classes: BTreeSet<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    displayed: bool,
    text: String,
    value: FieldValue,
}

impl Node {
    fn element(id: Option<&str>, classes: &[&str]) -> Self {
        Self {
            role: Role::Element,
            id: id.map(str::to_string),
            name: None,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            parent: None,
            children: Vec::new(),
            displayed: true,
            text: String::new(),
            value: FieldValue::Text(String::new()),
        }
    }
}

/// A tree of elements rooted at a single `<form>`.
///
/// Controls get an `id` equal to their `name`, the way the portal pages
/// declare them.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    focused: Option<NodeId>,
    scrolled_to: Option<NodeId>,
}

impl MemoryDom {
    pub fn new(form_id: &str) -> Self {
        Self {
            nodes: vec![Node::element(Some(form_id), &[])],
            focused: None,
            scrolled_to: None,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn attach(&mut self, parent: NodeId, mut node: Node, before: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        let children = &mut self.node_mut(parent).children;
        match before.and_then(|b| children.iter().position(|c| *c == b)) {
            Some(pos) => children.insert(pos, id),
            None => children.push(id),
        }
        id
    }

    /// Append a plain element under `parent`
    pub fn append_element(&mut self, parent: NodeId, id: Option<&str>, classes: &[&str]) -> NodeId {
        self.attach(parent, Node::element(id, classes), None)
    }

    /// Append a named control under `parent`
    pub fn append_control(&mut self, parent: NodeId, kind: ControlKind, name: &str) -> NodeId {
        let mut node = Node::element(Some(name), &[]);
        node.role = Role::Control(kind);
        node.name = Some(name.to_string());
        node.value = empty_value(kind);
        self.attach(parent, node, None)
    }

    /// Append `<div class="field">` holding one control
    pub fn append_field(&mut self, parent: NodeId, kind: ControlKind, name: &str) -> NodeId {
        let wrapper = self.append_element(parent, None, &["field"]);
        self.append_control(wrapper, kind, name)
    }

    fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(from).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .find(|n| self.node(*n).id.as_deref() == Some(id))
    }

    fn is_control(&self, id: NodeId) -> bool {
        matches!(self.node(id).role, Role::Control(_))
    }

    fn closest_with_class(&self, from: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(from);
        while let Some(id) = current {
            if self.node(id).classes.contains(class) {
                return Some(id);
            }
            current = self.node(id).parent;
        }
        None
    }

    fn error_anchor(&self, control: NodeId, wrapper_class: &str) -> NodeId {
        self.closest_with_class(control, wrapper_class)
            .or(self.node(control).parent)
            .unwrap_or(self.root())
    }

    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings.get(pos + 1).copied()
    }

    // --- Test and host helpers, addressed by control name ---

    /// Type a value into a text, select or textarea control
    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(id) = self.control(name) {
            self.node_mut(id).value = FieldValue::Text(value.to_string());
        }
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) {
        if let Some(id) = self.control(name) {
            self.node_mut(id).value = FieldValue::Checked(checked);
        }
    }

    pub fn set_file(&mut self, name: &str, file: Option<FileInfo>) {
        if let Some(id) = self.control(name) {
            self.node_mut(id).value = FieldValue::File(file);
        }
    }

    /// Current value of a control, `None` when there is no such control
    pub fn value(&self, name: &str) -> Option<FieldValue> {
        self.control(name).map(|id| self.node(id).value.clone())
    }

    pub fn is_invalid(&self, name: &str) -> bool {
        self.control(name)
            .is_some_and(|id| self.node(id).classes.contains(INVALID_CLASS))
    }

    /// Whether the element with the given id is displayed
    pub fn is_shown(&self, id: &str) -> bool {
        self.by_id(id).is_some_and(|n| self.node(n).displayed)
    }

    /// Text of the element with the given id
    pub fn text_of(&self, id: &str) -> Option<String> {
        self.by_id(id).map(|n| self.node(n).text.clone())
    }

    pub fn notice(&self) -> Option<String> {
        self.nodes_with_class(NOTICE_CLASS)
            .first()
            .map(|n| self.node(*n).text.clone())
    }

    /// Whether a success notice exists and is displayed
    pub fn notice_shown(&self) -> bool {
        self.nodes_with_class(NOTICE_CLASS)
            .first()
            .is_some_and(|n| self.node(*n).displayed)
    }

    pub fn count_with_class(&self, class: &str) -> usize {
        self.nodes_with_class(class).len()
    }

    pub fn focused(&self) -> Option<String> {
        self.focused.and_then(|n| self.node(n).name.clone())
    }

    pub fn scrolled_to(&self) -> Option<String> {
        self.scrolled_to.and_then(|n| self.node(n).name.clone())
    }

    // --- Page layouts ---

    /// Property registration (application) form
    pub fn application_form() -> Self {
        let mut dom = Self::new("applicationForm");
        let root = dom.root();
        dom.append_field(root, ControlKind::Select, "id_estate");

        let estate = dom.append_element(root, Some("new_estate_fields"), &[]);
        dom.append_field(estate, ControlKind::Select, "new_est_osiedle");
        dom.append_field(estate, ControlKind::Select, "new_est_type");

        let attachment = dom.append_element(estate, Some("new_est_attachment_field"), &[]);
        let field = dom.append_element(attachment, None, &["field"]);
        let picker = dom.append_element(field, None, &[]);
        dom.append_control(picker, ControlKind::File, "new_est_attachment");
        dom.append_element(picker, Some("new_est_attachment_name"), &[]);

        dom.append_field(estate, ControlKind::Text, "new_est_postal");
        dom.append_field(estate, ControlKind::Text, "new_est_street");
        dom.append_field(estate, ControlKind::Text, "new_est_building");
        dom.append_field(estate, ControlKind::Text, "new_est_apartment");

        dom.append_field(root, ControlKind::Text, "bag_arrival_date");
        dom.append_field(root, ControlKind::Text, "bag_depart_date");
        dom.append_field(root, ControlKind::TextArea, "notes");
        dom
    }

    /// Resident signup form; error nodes follow their inputs
    pub fn signup_form() -> Self {
        let mut dom = Self::new("signupForm");
        let root = dom.root();
        for name in [
            "pesel",
            "first_name",
            "last_name",
            "phone_number",
            "email",
            "birth_date",
            "reg_address",
            "nip",
        ] {
            let row = dom.append_element(root, None, &["form-row"]);
            dom.append_control(row, ControlKind::Text, name);
        }
        let label = dom.append_element(root, None, &["checkbox-inline"]);
        dom.append_control(label, ControlKind::Checkbox, "isResident");
        dom
    }

    /// Resident or staff login form
    pub fn login_form(form_id: &str) -> Self {
        let mut dom = Self::new(form_id);
        let root = dom.root();
        dom.append_field(root, ControlKind::Text, "email");
        dom.append_field(root, ControlKind::Text, "password");
        dom
    }
}

fn empty_value(kind: ControlKind) -> FieldValue {
    match kind {
        ControlKind::Checkbox => FieldValue::Checked(false),
        ControlKind::File => FieldValue::File(None),
        ControlKind::Text | ControlKind::Select | ControlKind::TextArea => {
            FieldValue::Text(String::new())
        }
    }
}

impl FormDom for MemoryDom {
    type Node = NodeId;

    fn control(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| self.is_control(*n) && self.node(*n).name.as_deref() == Some(name))
    }

    fn controls(&self) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|n| self.is_control(*n))
            .collect()
    }

    fn controls_within(&self, container_id: &str) -> Vec<NodeId> {
        self.by_id(container_id)
            .map(|c| {
                self.descendants(c)
                    .into_iter()
                    .filter(|n| self.is_control(*n))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn element(&self, id: &str) -> Option<NodeId> {
        self.by_id(id)
    }

    fn name_of(&self, node: &NodeId) -> String {
        self.node(*node).name.clone().unwrap_or_default()
    }

    fn kind_of(&self, node: &NodeId) -> ControlKind {
        match self.node(*node).role {
            Role::Control(kind) => kind,
            Role::Element => ControlKind::Text,
        }
    }

    fn read(&self, node: &NodeId) -> FieldValue {
        self.node(*node).value.clone()
    }

    fn clear_value(&mut self, node: &NodeId) {
        let kind = self.kind_of(node);
        self.node_mut(*node).value = empty_value(kind);
    }

    fn set_displayed(&mut self, node: &NodeId, displayed: bool) {
        self.node_mut(*node).displayed = displayed;
    }

    fn find_error_node(&self, control: &NodeId, placement: &ErrorPlacement) -> Option<NodeId> {
        match placement {
            ErrorPlacement::Container { wrapper_class } => {
                let anchor = self.error_anchor(*control, wrapper_class);
                self.descendants(anchor)
                    .into_iter()
                    .find(|n| self.node(*n).classes.contains(ERROR_CLASS))
            }
            ErrorPlacement::NextSibling => self
                .next_sibling(*control)
                .filter(|n| self.node(*n).classes.contains(ERROR_CLASS)),
        }
    }

    fn create_error_node(&mut self, control: &NodeId, placement: &ErrorPlacement) -> Option<NodeId> {
        let node = Node::element(None, &[ERROR_CLASS]);
        match placement {
            ErrorPlacement::Container { wrapper_class } => {
                let anchor = self.error_anchor(*control, wrapper_class);
                Some(self.attach(anchor, node, None))
            }
            ErrorPlacement::NextSibling => {
                let parent = self.node(*control).parent?;
                let before = self.next_sibling(*control);
                Some(self.attach(parent, node, before))
            }
        }
    }

    fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|n| self.node(*n).classes.contains(class))
            .collect()
    }

    fn text(&self, node: &NodeId) -> String {
        self.node(*node).text.clone()
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        self.node_mut(*node).text = text.to_string();
    }

    fn set_class(&mut self, node: &NodeId, class: &str, present: bool) {
        let classes = &mut self.node_mut(*node).classes;
        if present {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.node(*node).classes.contains(class)
    }

    fn show_notice(&mut self, text: &str) {
        let notice = match self.nodes_with_class(NOTICE_CLASS).first() {
            Some(existing) => *existing,
            None => {
                let root = self.root();
                self.append_element(root, None, &[NOTICE_CLASS])
            }
        };
        self.set_text(&notice, text);
        self.set_displayed(&notice, true);
    }

    fn focus(&mut self, node: &NodeId) {
        self.focused = Some(*node);
    }

    fn scroll_into_view(&mut self, node: &NodeId) {
        self.scrolled_to = Some(*node);
    }

    fn decorate_file_input(&mut self, control: &NodeId, label: &str) {
        let Some(parent) = self.node(*control).parent else {
            return;
        };
        if self.has_class(&parent, FILE_WRAP_CLASS) {
            return;
        }
        self.set_class(&parent, FILE_WRAP_CLASS, true);
        let mut button = Node::element(None, &[FILE_BUTTON_CLASS]);
        button.text = label.to_string();
        self.attach(parent, button, Some(*control));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_in_document_order() {
        let dom = MemoryDom::signup_form();
        let names: Vec<String> = dom.controls().iter().map(|n| dom.name_of(n)).collect();
        assert_eq!(names.first().map(String::as_str), Some("pesel"));
        assert_eq!(names.last().map(String::as_str), Some("isResident"));
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn test_controls_within_container() {
        let dom = MemoryDom::application_form();
        let inner: Vec<String> = dom
            .controls_within("new_est_attachment_field")
            .iter()
            .map(|n| dom.name_of(n))
            .collect();
        assert_eq!(inner, vec!["new_est_attachment".to_string()]);
        assert_eq!(dom.controls_within("new_estate_fields").len(), 7);
        assert!(dom.controls_within("missing").is_empty());
    }

    #[test]
    fn test_next_sibling_error_node() {
        let mut dom = MemoryDom::signup_form();
        let pesel = dom.control("pesel").unwrap();
        assert!(dom.find_error_node(&pesel, &ErrorPlacement::NextSibling).is_none());
        let created = dom.create_error_node(&pesel, &ErrorPlacement::NextSibling).unwrap();
        assert_eq!(dom.find_error_node(&pesel, &ErrorPlacement::NextSibling), Some(created));
    }

    #[test]
    fn test_container_error_node_falls_back_to_parent() {
        let mut dom = MemoryDom::signup_form();
        let email = dom.control("email").unwrap();
        let placement = ErrorPlacement::container("field");
        let created = dom.create_error_node(&email, &placement).unwrap();
        assert_eq!(dom.find_error_node(&email, &placement), Some(created));
        // The row is the parent, so the node shares it with the input.
        let pesel = dom.control("pesel").unwrap();
        assert!(dom.find_error_node(&pesel, &placement).is_none());
    }

    #[test]
    fn test_decorate_file_input_once() {
        let mut dom = MemoryDom::application_form();
        let input = dom.control("new_est_attachment").unwrap();
        dom.decorate_file_input(&input, "Załącz plik");
        dom.decorate_file_input(&input, "Załącz plik");
        assert_eq!(dom.count_with_class(FILE_BUTTON_CLASS), 1);
        assert_eq!(dom.count_with_class(FILE_WRAP_CLASS), 1);
    }

    #[test]
    fn test_clear_value_by_kind() {
        let mut dom = MemoryDom::signup_form();
        dom.set_checked("isResident", true);
        let checkbox = dom.control("isResident").unwrap();
        dom.clear_value(&checkbox);
        assert_eq!(dom.value("isResident"), Some(FieldValue::Checked(false)));
    }
}
