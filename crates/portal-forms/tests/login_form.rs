use portal_forms::{Dispatch, FormEvent, FormKind, FormValidator, MemoryDom, PortalConfig};
use pretty_assertions::assert_eq;
use std::rc::Rc;

fn submit(kind: FormKind, email: &str) -> (MemoryDom, Dispatch) {
    let form = Rc::new(FormValidator::new(kind, Rc::new(PortalConfig::default())));
    let mut dom = MemoryDom::login_form(kind.default_form_id());
    let bus = Rc::clone(&form).mount(&mut dom);
    dom.set_value("email", email);
    dom.set_value("password", "tajne");
    let outcome = bus.dispatch(&mut dom, &FormEvent::submit());
    (dom, outcome)
}

#[test]
fn test_login_notice_names_the_user() {
    let (dom, outcome) = submit(FormKind::Login, "  jan@plock.eu ");
    assert!(matches!(outcome, Dispatch::Accepted { .. }));
    assert_eq!(
        dom.notice().as_deref(),
        Some("Zalogowano: jan@plock.eu (to jest demo — nie wysyła danych)")
    );
}

#[test]
fn test_staff_login_notice() {
    let (dom, _) = submit(FormKind::StaffLogin, "urzednik@plock.eu");
    assert_eq!(
        dom.notice().as_deref(),
        Some("Zalogowano jako pracownik (demo): urzednik@plock.eu")
    );
}

#[test]
fn test_malformed_email_blocks_login() {
    let (dom, outcome) = submit(FormKind::Login, "jan..kowalski@plock.eu");
    assert_eq!(outcome, Dispatch::Blocked);
    assert_eq!(dom.notice(), None);
    assert!(dom.is_invalid("email"));
    assert_eq!(dom.focused().as_deref(), Some("email"));
}
