//! Wire DTOs for the AgriScan REST API plus their display helpers.
//!
//! DESIGN
//! ======
//! Field names mirror the backend JSON exactly so serde stays lossless.
//! Presentation formatting lives next to the data it formats so the
//! browser and the terminal render results identically.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Advice shown whenever a diagnosis is not a clean `success`.
pub const REMEDIATION_ADVICE: &str = "Isolate the affected plant immediately. Check for pests on the underside of \
     leaves. Apply appropriate organic fungicide or neem oil as needed.";

/// Name used in greetings when the user has none.
pub const FALLBACK_GREETING_NAME: &str = "Farmer";

/// History confidence strictly above this renders as a high-confidence badge.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 80.0;

/// Server-side identifier of a history entry.
pub type HistoryId = i64;

/// User identifier; the backend may send it as a number or a string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// The authenticated user as returned by `/api/login` and persisted locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// First whitespace-separated word of the display name.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.name.split_whitespace().next()
    }
}

/// Name to greet, falling back to [`FALLBACK_GREETING_NAME`].
#[must_use]
pub fn greeting_name(user: Option<&User>) -> &str {
    user.and_then(User::first_name).unwrap_or(FALLBACK_GREETING_NAME)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful `/api/login` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer credential for every authenticated call.
    #[serde(alias = "credential")]
    pub access_token: String,
    pub user: User,
}

/// Classification outcome reported by `/api/predict`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Success,
    Warning,
    /// Confidence below the backend acceptance threshold.
    Rejected,
}

/// One diagnosis. Immutable once received.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub status: PredictionStatus,
    /// Raw class name, e.g. `Tomato___Leaf_Mold`.
    pub prediction: String,
    /// Percentage in `0..=100`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl PredictionResult {
    /// Class name with underscores rendered as spaces.
    #[must_use]
    pub fn label(&self) -> String {
        humanize_label(&self.prediction)
    }

    /// Confidence as shown on the report, e.g. `62.4%`.
    #[must_use]
    pub fn confidence_text(&self) -> String {
        format!("{}%", self.confidence)
    }

    /// Whether the remediation panel applies.
    #[must_use]
    pub fn needs_remediation(&self) -> bool {
        self.status != PredictionStatus::Success
    }
}

/// Replace every `_` with a space.
#[must_use]
pub fn humanize_label(raw: &str) -> String {
    raw.replace('_', " ")
}

/// A past diagnosis from `/api/history`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub created_at: String,
    pub image_path: String,
    pub prediction: String,
    pub confidence: f64,
}

impl HistoryEntry {
    /// Confidence with one decimal, e.g. `91.0%`.
    #[must_use]
    pub fn confidence_text(&self) -> String {
        format!("{:.1}%", self.confidence)
    }

    #[must_use]
    pub fn is_high_confidence(&self) -> bool {
        self.confidence > HIGH_CONFIDENCE_THRESHOLD
    }

    /// Calendar date of `created_at`, e.g. `May 1, 2024`. Unparseable
    /// timestamps are shown verbatim.
    #[must_use]
    pub fn date_label(&self) -> String {
        parse_timestamp(&self.created_at).map_or_else(
            || self.created_at.clone(),
            |date| date.format("%b %-d, %Y").to_string(),
        )
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}
