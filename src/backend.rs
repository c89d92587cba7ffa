//! Network seam between the controllers and the AgriScan API.
//!
//! ARCHITECTURE
//! ============
//! Controllers only see [`Backend`]. The browser implements it with
//! `gloo-net`, the CLI with `reqwest`, and tests with in-memory fakes.
//! Futures are `?Send` because the browser executor is single-threaded.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::intake::ImageArtifact;
use crate::types::{HistoryEntry, HistoryId, LoginResponse, PredictionResult};

/// Multipart field carrying the image bytes on `/api/predict`.
pub const IMAGE_FIELD: &str = "image";

/// `Authorization` header value for a credential.
#[must_use]
pub fn bearer(credential: &str) -> String {
    format!("Bearer {credential}")
}

/// Decode a 2xx JSON body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body does not match `T`.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// The five API calls the client core consumes.
#[async_trait::async_trait(?Send)]
pub trait Backend {
    /// `POST /api/login`.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// `POST /api/register`. Success carries no session.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError>;

    /// `POST /api/predict` with a multipart [`IMAGE_FIELD`] part.
    async fn predict(&self, credential: &str, image: &ImageArtifact) -> Result<PredictionResult, ApiError>;

    /// `GET /api/history`, newest first.
    async fn history(&self, credential: &str) -> Result<Vec<HistoryEntry>, ApiError>;

    /// `DELETE /api/history/{id}`.
    async fn delete_history(&self, credential: &str, id: HistoryId) -> Result<(), ApiError>;
}
