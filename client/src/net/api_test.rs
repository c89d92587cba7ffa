use super::*;

#[test]
fn default_backend_targets_build_time_origin() {
    let backend = HttpBackend::default();
    assert_eq!(backend.config(), &ApiConfig::from_build_env());
}

#[test]
fn backend_keeps_configured_origin() {
    let backend = HttpBackend::new(ApiConfig::new("https://scan.example.com/"));
    assert_eq!(backend.config().predict_url(), "https://scan.example.com/api/predict");
}

#[cfg(not(feature = "csr"))]
#[test]
fn native_build_reports_network_failure() {
    let backend = HttpBackend::default();
    let err = futures::executor::block_on(backend.history("tok1")).expect_err("no browser");
    assert_eq!(err, ApiError::Network(UNAVAILABLE.to_owned()));
    assert_eq!(err.server_message(), None);
}
