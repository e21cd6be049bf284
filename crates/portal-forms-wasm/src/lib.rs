//! Portal Forms WASM
//!
//! Mounts the resident portal forms on the live page and exposes the quick
//! field checks to JavaScript.

use portal_forms::rules::{RuleContext, RuleSet, SignupRules};
use portal_forms::{
    Clock, Dispatch, EventBus, EventKind, FieldValue, FormEvent, FormKind, FormSnapshot,
    FormValidator, PortalConfig, SuccessAction, SystemClock,
};
use portal_forms_validation as core;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

mod web_dom;

pub use web_dom::WebDom;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Write a warning to the browser console
pub(crate) fn console_warn(message: &str, detail: &JsValue) {
    web_sys::console::warn_2(&JsValue::from_str(message), detail);
}

/// Configuration passed from JavaScript; `undefined` or `null` means defaults.
///
/// Sections left out of the object keep their defaults, e.g.
/// `{ districts: { "Nowe Osiedle": 30 } }` only replaces the district map.
fn portal_config(config: JsValue) -> Result<PortalConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(PortalConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))
}

/// Bind `kind`'s validator to the form with id `form_id`
fn mount(kind: FormKind, form_id: &str, config: JsValue) -> Result<(), JsValue> {
    let config = Rc::new(portal_config(config)?);
    let mut dom = WebDom::find(form_id).map_err(js_error)?;
    let validator = Rc::new(FormValidator::new(kind, config));
    let bus = Rc::new(validator.mount(&mut dom));

    for event_kind in bus.kinds() {
        listen(&dom, event_kind, Rc::clone(&bus))?;
    }
    Ok(())
}

/// Forward one DOM event type from the form to the bus
fn listen(dom: &WebDom, kind: EventKind, bus: Rc<EventBus<WebDom>>) -> Result<(), JsValue> {
    let handle = dom.clone();
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(form_event) = form_event(kind, &event) else {
            return;
        };
        let mut dom = handle.clone();
        let outcome = bus.dispatch(&mut dom, &form_event);
        if outcome.prevents_default() {
            event.prevent_default();
        }

        if let Dispatch::Accepted { snapshot, action } = outcome {
            web_sys::console::log_1(&JsValue::from_str(&snapshot.to_json().to_string()));
            if action == SuccessAction::Submit {
                if let Err(err) = dom.form().submit() {
                    console_warn("form submission failed", &err);
                }
            }
        }
    });

    // blur does not bubble, so the form only sees it while capturing
    let capture = kind == EventKind::Blur;
    dom.form().add_event_listener_with_callback_and_bool(
        kind.as_str(),
        handler.as_ref().unchecked_ref(),
        capture,
    )?;
    handler.forget();
    Ok(())
}

fn form_event(kind: EventKind, event: &Event) -> Option<FormEvent> {
    if kind == EventKind::Submit {
        return Some(FormEvent::submit());
    }
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let name = target.get_attribute("name")?;
    Some(FormEvent::on_control(kind, name))
}

/// Mount the property registration form. `config` is optional.
///
/// # Example (JavaScript)
/// ```javascript
/// document.addEventListener('DOMContentLoaded', () =>
///     mountApplicationForm('applicationForm', { districts: { 'Winiary': 1, 'Skarpa': 2 } }));
/// ```
#[wasm_bindgen(js_name = mountApplicationForm)]
pub fn mount_application_form(form_id: &str, config: JsValue) -> Result<(), JsValue> {
    mount(FormKind::Application, form_id, config)
}

#[wasm_bindgen(js_name = mountSignupForm)]
pub fn mount_signup_form(form_id: &str, config: JsValue) -> Result<(), JsValue> {
    mount(FormKind::Signup, form_id, config)
}

#[wasm_bindgen(js_name = mountLoginForm)]
pub fn mount_login_form(form_id: &str, config: JsValue) -> Result<(), JsValue> {
    mount(FormKind::Login, form_id, config)
}

#[wasm_bindgen(js_name = mountStaffLoginForm)]
pub fn mount_staff_login_form(form_id: &str, config: JsValue) -> Result<(), JsValue> {
    mount(FormKind::StaffLogin, form_id, config)
}

/// Mount a form by kind name (`application`, `signup`, `login`, `staff`).
/// Without `formId` the portal's usual form id is used.
#[wasm_bindgen(js_name = mountForm)]
pub fn mount_form(kind: &str, form_id: Option<String>, config: JsValue) -> Result<(), JsValue> {
    let kind: FormKind = kind.parse().map_err(js_error)?;
    let form_id = form_id.unwrap_or_else(|| kind.default_form_id().to_string());
    mount(kind, &form_id, config)
}

/// Validate a mounted-or-not form without rendering anything
///
/// # Returns
/// Array of `{ field, message }` objects (empty if valid)
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(kind: &str, form_id: &str, config: JsValue) -> Result<JsValue, JsValue> {
    let kind: FormKind = kind.parse().map_err(js_error)?;
    let config = Rc::new(portal_config(config)?);
    let dom = WebDom::find(form_id).map_err(js_error)?;
    let report = FormValidator::new(kind, config).validate(&dom);
    Ok(serde_wasm_bindgen::to_value(report.errors())?)
}

/// Check one signup field; returns the error message, if any
#[wasm_bindgen(js_name = validateSignupField)]
pub fn validate_signup_field(name: &str, value: &str) -> Option<String> {
    let config = PortalConfig::default();
    let snapshot =
        FormSnapshot::from_values([(name.to_string(), FieldValue::Text(value.to_string()))]);
    let ctx = RuleContext {
        config: &config,
        today: SystemClock.today(),
    };
    SignupRules.check(name, &snapshot, &ctx).err()
}

/// Quick PESEL shape check (11 digits)
#[wasm_bindgen(js_name = isValidPesel)]
pub fn is_valid_pesel_js(value: &str) -> bool {
    core::is_valid_pesel(value.trim())
}

/// Quick postal code check (`09-400`), as strict as the application form
#[wasm_bindgen(js_name = isValidPostalCode)]
pub fn is_valid_postal_code_js(value: &str) -> bool {
    core::is_valid_postal_code(value)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    core::is_valid_email(email.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_pesel_validation() {
        assert!(is_valid_pesel_js("90010112345"));
        assert!(!is_valid_pesel_js("9001011234"));
        assert!(!is_valid_pesel_js("9001011234a"));
    }

    #[wasm_bindgen_test]
    fn test_postal_code_validation() {
        assert!(is_valid_postal_code_js("09-400"));
        assert!(!is_valid_postal_code_js("09400"));
        assert!(!is_valid_postal_code_js(" 09-400"));
    }

    #[wasm_bindgen_test]
    fn test_email_validation() {
        assert!(is_valid_email_js("user@example.com"));
        assert!(!is_valid_email_js("user@example"));
        assert!(!is_valid_email_js("invalid-email"));
    }

    #[wasm_bindgen_test]
    fn test_signup_field_validation() {
        assert_eq!(validate_signup_field("first_name", " Jo "), None);
        assert_eq!(
            validate_signup_field("first_name", "J"),
            Some("Imię musi mieć minimum 2 znaki".to_string())
        );
        assert_eq!(
            validate_signup_field("birth_date", ""),
            Some("Podaj datę urodzenia".to_string())
        );
        assert_eq!(validate_signup_field("unknown", ""), None);
    }

    #[wasm_bindgen_test]
    fn test_unknown_form_kind_is_rejected() {
        assert!(mount_form("survey", None, JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_config_defaults_without_argument() {
        let config = portal_config(JsValue::UNDEFINED).unwrap();
        assert_eq!(config.districts.id_of("Winiary"), Some(1));
        assert!(portal_config(JsValue::NULL).is_ok());
    }

    #[derive(Serialize)]
    struct DistrictOverride {
        districts: BTreeMap<&'static str, u32>,
    }

    #[wasm_bindgen_test]
    fn test_config_with_custom_district() {
        let value = DistrictOverride {
            districts: BTreeMap::from([("Nowe Osiedle", 30)]),
        }
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap();

        let config = portal_config(value).unwrap();
        assert_eq!(config.districts.id_of("Nowe Osiedle"), Some(30));
        assert!(!config.districts.contains("Winiary"));
        assert_eq!(config.rules.notes_max_len, 256);
        assert!(config.behavior.validate_on_blur);
    }

    #[wasm_bindgen_test]
    fn test_malformed_config_is_rejected() {
        assert!(portal_config(JsValue::from_str("Winiary")).is_err());
    }
}
