use super::*;

#[test]
fn server_message_prefers_message_field() {
    let body = r#"{"message":"Invalid credentials","error":"other"}"#;
    assert_eq!(server_message(body).as_deref(), Some("Invalid credentials"));
}

#[test]
fn server_message_falls_back_to_error_field() {
    assert_eq!(server_message(r#"{"error":"Model not loaded"}"#).as_deref(), Some("Model not loaded"));
}

#[test]
fn server_message_ignores_non_json_and_blank() {
    assert_eq!(server_message("<html>502</html>"), None);
    assert_eq!(server_message(r#"{"message":"   "}"#), None);
    assert_eq!(server_message(r#"{"message":42}"#), None);
}

#[test]
fn from_status_keeps_status_and_reason() {
    let err = ApiError::from_status(409, r#"{"message":"Email already registered"}"#);
    assert_eq!(
        err,
        ApiError::Status { status: 409, message: Some("Email already registered".to_owned()) }
    );
    assert_eq!(err.message_or("Registration failed"), "Email already registered");
}

#[test]
fn message_or_uses_fallback_for_network_errors() {
    let err = ApiError::Network("connection refused".to_owned());
    assert_eq!(err.message_or("Prediction failed"), "Prediction failed");
}

#[test]
fn request_error_carries_status_when_known() {
    let err = ClientError::request(&ApiError::from_status(500, "{}"), "Prediction failed");
    assert_eq!(err, ClientError::Request { status: Some(500), message: "Prediction failed".to_owned() });
    assert_eq!(err.kind(), ErrorKind::NetworkOrServerFailure);
    assert!(!err.is_silent());
}

#[test]
fn silent_kinds_are_validation_and_declined() {
    assert!(ClientError::ValidationRejected { mime_type: "text/plain".to_owned() }.is_silent());
    assert!(ClientError::Unreadable("eof".to_owned()).is_silent());
    assert!(ClientError::ConfirmationDeclined.is_silent());
    assert!(!ClientError::AuthFailure("nope".to_owned()).is_silent());
}

#[test]
fn auth_error_displays_reason() {
    let err = ClientError::auth(&ApiError::from_status(401, r#"{"message":"Invalid credentials"}"#), "Login failed");
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(err.kind(), ErrorKind::AuthFailure);
}
