use super::*;

fn filled() -> SignupForm {
    SignupForm {
        email: " a@b.com ".to_owned(),
        password: "secret".to_owned(),
        confirm: "secret".to_owned(),
        first_name: " Ada ".to_owned(),
        last_name: "Lovelace".to_owned(),
        phone: "   ".to_owned(),
    }
}

#[test]
fn into_register_data_trims_and_drops_blank_phone() {
    let data = filled().into_register_data().unwrap();
    assert_eq!(data.email, "a@b.com");
    assert_eq!(data.first_name, "Ada");
    assert_eq!(data.phone, None);
}

#[test]
fn into_register_data_keeps_phone() {
    let form = SignupForm { phone: " 555-0100 ".to_owned(), ..filled() };
    assert_eq!(form.into_register_data().unwrap().phone.as_deref(), Some("555-0100"));
}

#[test]
fn into_register_data_rejects_mismatched_passwords() {
    let form = SignupForm { confirm: "other".to_owned(), ..filled() };
    assert_eq!(form.into_register_data().unwrap_err(), "Passwords do not match");
}

#[test]
fn into_register_data_requires_last_name() {
    let form = SignupForm { last_name: " ".to_owned(), ..filled() };
    assert_eq!(form.into_register_data().unwrap_err(), "Last name is required");
}
