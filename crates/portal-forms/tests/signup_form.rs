use chrono::NaiveDate;
use portal_forms::{
    Dispatch, EventBus, FixedClock, FormEvent, FormKind, FormValidator, MemoryDom, PortalConfig,
    SuccessAction,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::rc::Rc;

fn mount() -> (MemoryDom, EventBus<MemoryDom>, Rc<FormValidator>) {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let form = Rc::new(
        FormValidator::new(FormKind::Signup, Rc::new(PortalConfig::default()))
            .with_clock(FixedClock(today)),
    );
    let mut dom = MemoryDom::signup_form();
    let bus = Rc::clone(&form).mount(&mut dom);
    (dom, bus, form)
}

fn fill_valid(dom: &mut MemoryDom) {
    dom.set_value("pesel", "90010112345");
    dom.set_value("first_name", "Anna");
    dom.set_value("last_name", "Kowalska");
    dom.set_value("phone_number", "+48 600 100 200");
    dom.set_value("email", "anna@plock.eu");
    dom.set_value("birth_date", "1990-01-01");
    dom.set_value("reg_address", "ul. Tumska 1");
    dom.set_value("nip", "");
}

#[test]
fn test_unchecked_resident_box_blocks() {
    let (mut dom, bus, form) = mount();
    fill_valid(&mut dom);

    assert_eq!(bus.dispatch(&mut dom, &FormEvent::submit()), Dispatch::Blocked);
    assert_eq!(
        form.presenter().message(&dom, "isResident").as_deref(),
        Some("Musisz potwierdzić, że jesteś mieszkańcem")
    );
    let report = form.validate(&dom);
    assert_eq!(report.len(), 1);
    assert_eq!(report.first().map(|e| e.field.as_str()), Some("isResident"));
    assert_eq!(dom.notice(), None);
}

#[test]
fn test_valid_signup_is_submitted() {
    let (mut dom, bus, _form) = mount();
    fill_valid(&mut dom);
    dom.set_checked("isResident", true);

    match bus.dispatch(&mut dom, &FormEvent::submit()) {
        Dispatch::Accepted { snapshot, action } => {
            assert_eq!(action, SuccessAction::Submit);
            assert!(snapshot.is_checked("isResident"));
            assert_eq!(snapshot.text("pesel"), "90010112345");
        }
        other => panic!("expected acceptance, got {:?}", other),
    }
    assert_eq!(dom.notice().as_deref(), Some("Walidacja zakończona sukcesem!"));
}

#[test]
fn test_first_failing_field_gets_focus() {
    let (mut dom, bus, form) = mount();
    fill_valid(&mut dom);
    dom.set_checked("isResident", true);
    dom.set_value("email", "anna@plock");
    dom.set_value("reg_address", "ul.");

    assert_eq!(bus.dispatch(&mut dom, &FormEvent::submit()), Dispatch::Blocked);
    assert_eq!(dom.focused().as_deref(), Some("email"));
    assert_eq!(
        form.presenter().message(&dom, "email").as_deref(),
        Some("Domena e-mail musi zawierać kropkę (np. example.com)")
    );
    assert_eq!(
        form.presenter().message(&dom, "reg_address").as_deref(),
        Some("Adres jest za krótki")
    );
    assert_eq!(form.presenter().message(&dom, "pesel"), None);
}

#[rstest]
#[case("", Some("Podaj datę urodzenia"))]
#[case("1990-02-30", Some("Niepoprawna data"))]
#[case("2026-10-20", Some("Data nie może być z przyszłości"))]
#[case("2009-01-01", Some("Musisz mieć co najmniej 18 lat"))]
#[case("2008-12-31", None)]
#[case("1990-01-01", None)]
fn test_birth_date_on_blur(#[case] value: &str, #[case] expected: Option<&str>) {
    let (mut dom, bus, form) = mount();
    dom.set_value("birth_date", value);
    bus.dispatch(&mut dom, &FormEvent::blur("birth_date"));
    assert_eq!(form.presenter().message(&dom, "birth_date").as_deref(), expected);
}

#[test]
fn test_blur_then_input_clears() {
    let (mut dom, bus, form) = mount();
    dom.set_value("pesel", "1234");
    bus.dispatch(&mut dom, &FormEvent::blur("pesel"));
    assert_eq!(
        form.presenter().message(&dom, "pesel").as_deref(),
        Some("PESEL musi zawierać dokładnie 11 cyfr")
    );
    assert!(dom.is_invalid("pesel"));

    dom.set_value("pesel", "12345");
    bus.dispatch(&mut dom, &FormEvent::input("pesel"));
    assert_eq!(form.presenter().message(&dom, "pesel"), None);
    assert!(!dom.is_invalid("pesel"));
}

#[test]
fn test_blur_on_checkbox_does_nothing() {
    let (mut dom, bus, form) = mount();
    bus.dispatch(&mut dom, &FormEvent::blur("isResident"));
    assert_eq!(form.presenter().message(&dom, "isResident"), None);
}

#[test]
fn test_optional_nip() {
    let (mut dom, bus, form) = mount();
    dom.set_value("nip", "  ");
    bus.dispatch(&mut dom, &FormEvent::blur("nip"));
    assert_eq!(form.presenter().message(&dom, "nip"), None);

    dom.set_value("nip", "123-456");
    bus.dispatch(&mut dom, &FormEvent::blur("nip"));
    assert_eq!(
        form.presenter().message(&dom, "nip").as_deref(),
        Some("NIP musi mieć 10 cyfr")
    );
}
