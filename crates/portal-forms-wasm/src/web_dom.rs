// File: src/web_dom.rs
// Purpose: The form document as seen through web-sys

use portal_forms::dom::{
    ControlKind, ErrorPlacement, FieldValue, FormDom, ERROR_CLASS, FILE_BUTTON_CLASS,
    FILE_WRAP_CLASS, NOTICE_CLASS,
};
use crate::console_warn;
use portal_forms::MountError;
use portal_forms_validation::FileInfo;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, NodeList, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

const CONTROL_SELECTOR: &str = "input[name], select[name], textarea[name]";

/// A `<form>` on the live page.
///
/// Cloning is cheap; every clone refers to the same elements.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
    form: HtmlFormElement,
}

impl WebDom {
    /// Look up the form with the given id in the current document
    pub fn find(form_id: &str) -> Result<Self, MountError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| MountError::Dom("no document available".to_string()))?;
        let element = document
            .get_element_by_id(form_id)
            .ok_or_else(|| MountError::FormNotFound(form_id.to_string()))?;
        let form = element
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| MountError::NotAForm(form_id.to_string()))?;
        Ok(Self { document, form })
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    fn query_all(&self, root: &Element, selector: &str) -> Vec<Element> {
        logged("querySelectorAll", root.query_selector_all(selector))
            .map(elements)
            .unwrap_or_default()
    }

    fn create(&self, tag: &str, class: &str) -> Option<Element> {
        let element = logged("createElement", self.document.create_element(tag))?;
        element.set_class_name(class);
        Some(element)
    }

    fn error_anchor(&self, control: &Element, wrapper_class: &str) -> Option<Element> {
        logged("closest", control.closest(&format!(".{wrapper_class}")))
            .flatten()
            .or_else(|| control.parent_element())
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Keep going after a failed DOM call, leaving a trace of it in the console
fn logged<T>(operation: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            console_warn(&format!("DOM call failed: {operation}"), &err);
            None
        }
    }
}

fn text_value(node: &Element) -> String {
    if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

impl FormDom for WebDom {
    type Node = Element;

    fn control(&self, name: &str) -> Option<Element> {
        logged(
            "querySelector",
            self.form.query_selector(&format!("[name=\"{name}\"]")),
        )
        .flatten()
    }

    fn controls(&self) -> Vec<Element> {
        self.query_all(&self.form, CONTROL_SELECTOR)
    }

    fn controls_within(&self, container_id: &str) -> Vec<Element> {
        match self.document.get_element_by_id(container_id) {
            Some(container) => self.query_all(&container, CONTROL_SELECTOR),
            None => Vec::new(),
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn name_of(&self, node: &Element) -> String {
        node.get_attribute("name").unwrap_or_default()
    }

    fn kind_of(&self, node: &Element) -> ControlKind {
        match node.tag_name().to_ascii_lowercase().as_str() {
            "select" => ControlKind::Select,
            "textarea" => ControlKind::TextArea,
            _ => match node.get_attribute("type").map(|t| t.to_ascii_lowercase()).as_deref() {
                Some("checkbox") => ControlKind::Checkbox,
                Some("file") => ControlKind::File,
                _ => ControlKind::Text,
            },
        }
    }

    fn read(&self, node: &Element) -> FieldValue {
        let input = node.dyn_ref::<HtmlInputElement>();
        match self.kind_of(node) {
            ControlKind::Checkbox => FieldValue::Checked(input.is_some_and(|i| i.checked())),
            ControlKind::File => FieldValue::File(
                input
                    .and_then(|i| i.files())
                    .and_then(|files| files.get(0))
                    .map(|file| {
                        let media_type = file.type_();
                        FileInfo::new(
                            file.name(),
                            Some(media_type.as_str()).filter(|t| !t.is_empty()),
                            file.size() as u64,
                        )
                    }),
            ),
            _ => FieldValue::Text(text_value(node)),
        }
    }

    fn clear_value(&mut self, node: &Element) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            if self.kind_of(node) == ControlKind::Checkbox {
                input.set_checked(false);
            } else {
                input.set_value("");
            }
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.set_value("");
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value("");
        }
    }

    fn set_displayed(&mut self, node: &Element, displayed: bool) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            let display = if displayed { "block" } else { "none" };
            logged("style.display", element.style().set_property("display", display));
        }
    }

    fn find_error_node(&self, control: &Element, placement: &ErrorPlacement) -> Option<Element> {
        match placement {
            ErrorPlacement::Container { wrapper_class } => {
                let anchor = self.error_anchor(control, wrapper_class)?;
                logged("querySelector", anchor.query_selector(&format!(".{ERROR_CLASS}"))).flatten()
            }
            ErrorPlacement::NextSibling => control
                .next_element_sibling()
                .filter(|sibling| sibling.class_list().contains(ERROR_CLASS)),
        }
    }

    fn create_error_node(&mut self, control: &Element, placement: &ErrorPlacement) -> Option<Element> {
        let node = self.create("div", ERROR_CLASS)?;
        match placement {
            ErrorPlacement::Container { wrapper_class } => {
                let anchor = self.error_anchor(control, wrapper_class)?;
                logged("appendChild", anchor.append_child(&node))?;
            }
            ErrorPlacement::NextSibling => {
                let parent = control.parent_node()?;
                let next = control.next_sibling();
                logged("insertBefore", parent.insert_before(&node, next.as_ref()))?;
            }
        }
        Some(node)
    }

    fn nodes_with_class(&self, class: &str) -> Vec<Element> {
        self.query_all(&self.form, &format!(".{class}"))
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_class(&mut self, node: &Element, class: &str, present: bool) {
        let classes = node.class_list();
        if present {
            logged("classList.add", classes.add_1(class));
        } else {
            logged("classList.remove", classes.remove_1(class));
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn show_notice(&mut self, text: &str) {
        let existing = self.nodes_with_class(NOTICE_CLASS).into_iter().next();
        let notice = match existing {
            Some(notice) => notice,
            None => {
                let Some(notice) = self.create("div", NOTICE_CLASS) else {
                    return;
                };
                if logged("appendChild", self.form.append_child(&notice)).is_none() {
                    return;
                }
                notice
            }
        };
        notice.set_text_content(Some(text));
        self.set_displayed(&notice, true);
    }

    fn focus(&mut self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            logged("focus", element.focus());
        }
    }

    fn scroll_into_view(&mut self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn decorate_file_input(&mut self, control: &Element, label: &str) {
        let Some(parent) = control.parent_element() else {
            return;
        };
        if parent.class_list().contains(FILE_WRAP_CLASS) {
            return;
        }
        self.set_class(&parent, FILE_WRAP_CLASS, true);

        let Some(button) = self.create("label", FILE_BUTTON_CLASS) else {
            return;
        };
        logged("setAttribute", button.set_attribute("for", &control.id()));
        button.set_text_content(Some(label));
        logged("insertBefore", parent.insert_before(&button, Some(control.as_ref())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_failed_call_is_reported_and_skipped() {
        assert_eq!(logged("classList.add", Ok::<u8, JsValue>(3)), Some(3));
        assert_eq!(
            logged::<()>("classList.add", Err(JsValue::from_str("SyntaxError"))),
            None
        );
    }
}
