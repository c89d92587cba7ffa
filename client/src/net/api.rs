//! REST client for the AgriScan API.
//!
//! Browser (csr): real HTTP calls via `gloo-net`.
//! Native builds: every call fails with [`ApiError::Network`], since these
//! endpoints are only reachable from the browser bundle.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx bodies are normalized through [`ApiError::from_status`] here, so
//! controllers only ever see the core error taxonomy.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use agriscan::backend::Backend;
use agriscan::config::ApiConfig;
use agriscan::error::ApiError;
use agriscan::intake::ImageArtifact;
use agriscan::types::{HistoryEntry, HistoryId, LoginResponse, PredictionResult};

#[cfg(not(feature = "csr"))]
const UNAVAILABLE: &str = "not available outside the browser";

/// [`Backend`] over `fetch`.
#[derive(Clone, Debug, Default)]
pub struct HttpBackend {
    config: ApiConfig,
}

impl HttpBackend {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[cfg(feature = "csr")]
fn network(err: impl std::fmt::Display) -> ApiError {
    ApiError::Network(err.to_string())
}

#[cfg(feature = "csr")]
fn js_error(err: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(format!("{err:?}"))
}

/// Read a response body, mapping non-2xx to [`ApiError::Status`].
#[cfg(feature = "csr")]
async fn read_body(resp: gloo_net::http::Response) -> Result<String, ApiError> {
    let status = resp.status();
    let body = resp.text().await.map_err(network)?;
    if resp.ok() { Ok(body) } else { Err(ApiError::from_status(status, &body)) }
}

#[cfg(feature = "csr")]
fn image_form(image: &ImageArtifact) -> Result<web_sys::FormData, ApiError> {
    let form = web_sys::FormData::new().map_err(js_error)?;
    let bytes = js_sys::Uint8Array::from(image.bytes.as_slice());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&image.mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&bytes), &options)
        .map_err(js_error)?;
    form.append_with_blob_and_filename(agriscan::backend::IMAGE_FIELD, &blob, &image.file_name)
        .map_err(js_error)?;
    Ok(form)
}

#[async_trait::async_trait(?Send)]
impl Backend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let payload = agriscan::types::LoginRequest { email, password };
            let resp = gloo_net::http::Request::post(&self.config.login_url())
                .json(&payload)
                .map_err(network)?
                .send()
                .await
                .map_err(network)?;
            agriscan::backend::decode_json(&read_body(resp).await?)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password);
            Err(ApiError::Network(UNAVAILABLE.to_owned()))
        }
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let payload = agriscan::types::RegisterRequest { name, email, password };
            let resp = gloo_net::http::Request::post(&self.config.register_url())
                .json(&payload)
                .map_err(network)?
                .send()
                .await
                .map_err(network)?;
            read_body(resp).await.map(|_| ())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (name, email, password);
            Err(ApiError::Network(UNAVAILABLE.to_owned()))
        }
    }

    async fn predict(&self, credential: &str, image: &ImageArtifact) -> Result<PredictionResult, ApiError> {
        #[cfg(feature = "csr")]
        {
            let form = image_form(image)?;
            let resp = gloo_net::http::Request::post(&self.config.predict_url())
                .header("Authorization", &agriscan::backend::bearer(credential))
                .body(form)
                .map_err(network)?
                .send()
                .await
                .map_err(network)?;
            agriscan::backend::decode_json(&read_body(resp).await?)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (credential, image);
            Err(ApiError::Network(UNAVAILABLE.to_owned()))
        }
    }

    async fn history(&self, credential: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::get(&self.config.history_url())
                .header("Authorization", &agriscan::backend::bearer(credential))
                .send()
                .await
                .map_err(network)?;
            agriscan::backend::decode_json(&read_body(resp).await?)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credential;
            Err(ApiError::Network(UNAVAILABLE.to_owned()))
        }
    }

    async fn delete_history(&self, credential: &str, id: HistoryId) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::delete(&self.config.history_entry_url(id))
                .header("Authorization", &agriscan::backend::bearer(credential))
                .send()
                .await
                .map_err(network)?;
            read_body(resp).await.map(|_| ())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (credential, id);
            Err(ApiError::Network(UNAVAILABLE.to_owned()))
        }
    }
}
