use super::*;

#[test]
fn success_status_passes_body_through() {
    assert_eq!(check_status(200, "[]".to_owned()), Ok("[]".to_owned()));
    assert_eq!(check_status(204, String::new()), Ok(String::new()));
}

#[test]
fn error_status_extracts_server_message() {
    let err = check_status(401, r#"{"message":"Invalid credentials"}"#.to_owned()).expect_err("401");
    assert_eq!(err, ApiError::Status { status: 401, message: Some("Invalid credentials".to_owned()) });
}

#[test]
fn error_status_without_json_has_no_message() {
    let err = check_status(502, "Bad Gateway".to_owned()).expect_err("502");
    assert_eq!(err.server_message(), None);
}

#[test]
fn backend_targets_configured_origin() {
    let backend = ReqwestBackend::new(ApiConfig::new("http://127.0.0.1:5000/")).expect("client");
    assert_eq!(backend.config().history_entry_url(4), "http://127.0.0.1:5000/api/history/4");
}
