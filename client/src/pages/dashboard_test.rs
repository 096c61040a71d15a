use super::*;
use crate::net::types::{User, UserId};

fn filled() -> Contact {
    Contact {
        mobile: " 555-0100 ".to_owned(),
        email: "c@example.com ".to_owned(),
        address: "1 Main St".to_owned(),
        registration_number: " REG-1".to_owned(),
    }
}

#[test]
fn validate_contact_trims_every_field() {
    let contact = validate_contact(&filled()).unwrap();
    assert_eq!(contact.mobile, "555-0100");
    assert_eq!(contact.email, "c@example.com");
    assert_eq!(contact.registration_number, "REG-1");
}

#[test]
fn validate_contact_requires_all_fields() {
    for blank in 0..4 {
        let mut form = filled();
        let field = match blank {
            0 => &mut form.mobile,
            1 => &mut form.email,
            2 => &mut form.address,
            _ => &mut form.registration_number,
        };
        *field = "   ".to_owned();
        assert_eq!(validate_contact(&form), Err(CONTACT_REQUIRED_FIELDS_MESSAGE));
    }
}

#[test]
fn validate_search_requires_value() {
    assert_eq!(validate_search("  REG-1 "), Ok("REG-1".to_owned()));
    assert_eq!(validate_search(" "), Err(SEARCH_REQUIRED_MESSAGE));
}

#[test]
fn validate_delete_password_requires_value() {
    assert_eq!(validate_delete_password(""), Err(DELETE_PASSWORD_REQUIRED_MESSAGE));
    assert_eq!(validate_delete_password("pw"), Ok("pw".to_owned()));
}

#[test]
fn greeting_uses_display_name() {
    let state = AuthState {
        user: Some(User { id: UserId::Number(1), name: Some("Ada".to_owned()), email: None }),
        loading: false,
    };
    assert_eq!(greeting(&state), "Welcome, Ada");
    assert_eq!(greeting(&AuthState::default()), "Welcome");
}
