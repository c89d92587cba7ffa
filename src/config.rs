//! API origin configuration and endpoint paths.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Environment variable naming the API origin.
pub const API_URL_ENV: &str = "AGRISCAN_API_URL";

/// Origin used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Resolved API origin. All endpoint URLs are derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    /// Build a config from an origin. Trailing slashes are dropped; an empty
    /// origin yields same-origin relative URLs.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        Self { base_url }
    }

    /// Config baked in at compile time from `AGRISCAN_API_URL`.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("AGRISCAN_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    #[must_use]
    pub fn login_url(&self) -> String {
        self.endpoint("/api/login")
    }

    #[must_use]
    pub fn register_url(&self) -> String {
        self.endpoint("/api/register")
    }

    #[must_use]
    pub fn predict_url(&self) -> String {
        self.endpoint("/api/predict")
    }

    #[must_use]
    pub fn history_url(&self) -> String {
        self.endpoint("/api/history")
    }

    #[must_use]
    pub fn history_entry_url(&self, id: i64) -> String {
        self.endpoint(&format!("/api/history/{id}"))
    }

    /// Static thumbnail location for a stored upload.
    #[must_use]
    pub fn upload_url(&self, image_path: &str) -> String {
        self.endpoint(&format!("/uploads/{image_path}"))
    }
}
