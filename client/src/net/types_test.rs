use super::*;

#[test]
fn user_id_accepts_numbers_and_strings() {
    let numeric: User = serde_json::from_value(serde_json::json!({ "id": 1 })).unwrap();
    assert_eq!(numeric.id, UserId::Number(1));

    let text: User = serde_json::from_value(serde_json::json!({ "id": "65f0c2" })).unwrap();
    assert_eq!(text.id, UserId::Text("65f0c2".to_owned()));
}

#[test]
fn user_serializes_without_missing_profile_fields() {
    let user = User { id: UserId::Number(1), name: None, email: None };
    assert_eq!(serde_json::to_value(&user).unwrap(), serde_json::json!({ "id": 1 }));
}

#[test]
fn display_name_prefers_name_then_email_then_id() {
    let mut user = User {
        id: UserId::Number(7),
        name: Some("Ada".to_owned()),
        email: Some("ada@example.com".to_owned()),
    };
    assert_eq!(user.display_name(), "Ada");
    user.name = None;
    assert_eq!(user.display_name(), "ada@example.com");
    user.email = None;
    assert_eq!(user.display_name(), "7");
}

#[test]
fn auth_response_tolerates_token_only_body() {
    let body: AuthResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
    assert_eq!(body.token.as_deref(), Some("abc"));
    assert!(body.user.is_none());
}

#[test]
fn error_body_prefers_error_over_message() {
    let body: ErrorBody = serde_json::from_str(r#"{"error":"Email already exists","message":"x"}"#).unwrap();
    assert_eq!(body.into_message().as_deref(), Some("Email already exists"));

    let body: ErrorBody = serde_json::from_str(r#"{"message":"Contact not found"}"#).unwrap();
    assert_eq!(body.into_message().as_deref(), Some("Contact not found"));
}

#[test]
fn error_body_blank_message_is_none() {
    let body: ErrorBody = serde_json::from_str(r#"{"error":"   "}"#).unwrap();
    assert_eq!(body.into_message(), None);
    assert_eq!(ErrorBody::default().into_message(), None);
}

#[test]
fn contact_stats_defaults_missing_fields() {
    let stats: ContactStats = serde_json::from_str(r#"{"total_contacts":12}"#).unwrap();
    assert_eq!(stats.total_contacts, 12);
    assert_eq!(stats.recent_added, 0);
    assert!(stats.recent_activities.is_empty());
}

#[test]
fn contact_stats_parses_activity_feed() {
    let stats: ContactStats = serde_json::from_value(serde_json::json!({
        "total_contacts": 1234,
        "recent_added": 25,
        "recent_activities": [
            { "details": "New Contact Added", "timestamp": "2024-05-01T10:00:00Z" }
        ]
    }))
    .unwrap();
    assert_eq!(stats.recent_activities.len(), 1);
    assert_eq!(stats.recent_activities[0].details, "New Contact Added");
}
