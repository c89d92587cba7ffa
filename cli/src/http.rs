//! `reqwest` implementation of the core [`Backend`].
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become [`ApiError::Network`]; non-2xx responses are
//! normalized through [`ApiError::from_status`] before any command sees them.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use agriscan::backend::{Backend, IMAGE_FIELD, decode_json};
use agriscan::config::ApiConfig;
use agriscan::error::ApiError;
use agriscan::intake::ImageArtifact;
use agriscan::types::{HistoryEntry, HistoryId, LoginRequest, LoginResponse, PredictionResult, RegisterRequest};
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ReqwestBackend {
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialized.
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("agriscan-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

fn network(err: impl std::fmt::Display) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Map a status and body to the body on 2xx, or a normalized error.
fn check_status(status: u16, body: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) { Ok(body) } else { Err(ApiError::from_status(status, &body)) }
}

async fn read_body(resp: reqwest::Response) -> Result<String, ApiError> {
    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(network)?;
    tracing::debug!(status, bytes = body.len(), "api response");
    check_status(status, body)
}

#[async_trait::async_trait(?Send)]
impl Backend for ReqwestBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let resp = self
            .client
            .post(self.config.login_url())
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(network)?;
        decode_json(&read_body(resp).await?)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.config.register_url())
            .json(&RegisterRequest { name, email, password })
            .send()
            .await
            .map_err(network)?;
        read_body(resp).await.map(|_| ())
    }

    async fn predict(&self, credential: &str, image: &ImageArtifact) -> Result<PredictionResult, ApiError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(network)?;
        let resp = self
            .client
            .post(self.config.predict_url())
            .bearer_auth(credential)
            .multipart(Form::new().part(IMAGE_FIELD, part))
            .send()
            .await
            .map_err(network)?;
        decode_json(&read_body(resp).await?)
    }

    async fn history(&self, credential: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        let resp = self
            .client
            .get(self.config.history_url())
            .bearer_auth(credential)
            .send()
            .await
            .map_err(network)?;
        decode_json(&read_body(resp).await?)
    }

    async fn delete_history(&self, credential: &str, id: HistoryId) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.config.history_entry_url(id))
            .bearer_auth(credential)
            .send()
            .await
            .map_err(network)?;
        read_body(resp).await.map(|_| ())
    }
}
