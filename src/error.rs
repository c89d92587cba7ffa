//! Error taxonomy for the client core.
//!
//! ERROR HANDLING
//! ==============
//! Network failures arrive as [`ApiError`] and are normalized here, at the
//! boundary, before any controller inspects them. Controllers convert them
//! into [`ClientError`] and store the message in their own state; nothing
//! propagates to a global handler and nothing is fatal.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Failure of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network request failed: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("server returned {status}")]
    Status { status: u16, message: Option<String> },
    /// A 2xx response whose body did not match the expected schema.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from a raw response body, extracting the
    /// server-supplied reason when the body carries one.
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, message: server_message(body) }
    }

    /// Server-supplied reason, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Server-supplied reason, or `fallback` when there is none.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}

/// Pull `message` (or `error`) out of a JSON error body.
pub fn server_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}

/// Coarse failure category, used by the UI to decide how to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-image input. Silently ignored.
    ValidationRejected,
    /// Login or registration rejected. Shown inline near the form.
    AuthFailure,
    /// Any other API failure. Shown as a dismissible inline message.
    NetworkOrServerFailure,
    /// The user cancelled a destructive action. No-op.
    ConfirmationDeclined,
}

/// Failure of a controller operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("{mime_type:?} is not an image")]
    ValidationRejected { mime_type: String },
    #[error("could not read file: {0}")]
    Unreadable(String),
    #[error("{0}")]
    AuthFailure(String),
    #[error("{message}")]
    Request { status: Option<u16>, message: String },
    #[error("action cancelled")]
    ConfirmationDeclined,
}

impl ClientError {
    /// Auth-form failure carrying the server reason or `fallback`.
    pub fn auth(err: &ApiError, fallback: &str) -> Self {
        Self::AuthFailure(err.message_or(fallback))
    }

    /// Generic request failure carrying the server reason or `fallback`.
    pub fn request(err: &ApiError, fallback: &str) -> Self {
        let status = match err {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Decode(_) => None,
        };
        Self::Request { status, message: err.message_or(fallback) }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationRejected { .. } | Self::Unreadable(_) => ErrorKind::ValidationRejected,
            Self::AuthFailure(_) => ErrorKind::AuthFailure,
            Self::Request { .. } => ErrorKind::NetworkOrServerFailure,
            Self::ConfirmationDeclined => ErrorKind::ConfirmationDeclined,
        }
    }

    /// Whether the UI should swallow this failure without a message.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self.kind(), ErrorKind::ValidationRejected | ErrorKind::ConfirmationDeclined)
    }
}
