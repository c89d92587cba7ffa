//! Plain-text rendering of command results.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use agriscan::session::SessionState;
use agriscan::types::{HistoryEntry, PredictionResult, PredictionStatus, REMEDIATION_ADVICE};

fn status_word(status: PredictionStatus) -> &'static str {
    match status {
        PredictionStatus::Success => "healthy",
        PredictionStatus::Warning => "disease detected",
        PredictionStatus::Rejected => "not recognized",
    }
}

pub fn prediction_report(result: &PredictionResult) -> String {
    let mut out = format!(
        "Diagnosis:  {}\nConfidence: {}\nStatus:     {}\n",
        result.label(),
        result.confidence_text(),
        status_word(result.status),
    );
    if result.needs_remediation() {
        if let Some(details) = result.details.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "Details:    {details}");
        }
        let _ = writeln!(out, "\nRecommended action: {REMEDIATION_ADVICE}");
    }
    out
}

/// One line per entry in server order. High-confidence entries are starred.
pub fn history_table(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No scans yet.\n".to_owned();
    }
    entries.iter().fold(String::new(), |mut out, entry| {
        let marker = if entry.is_high_confidence() { " *" } else { "" };
        let _ = writeln!(
            out,
            "{:>6}  {:<13}  {:<36}  {:>6}{marker}",
            entry.id,
            entry.date_label(),
            agriscan::types::humanize_label(&entry.prediction),
            entry.confidence_text(),
        );
        out
    })
}

pub fn whoami(state: &SessionState) -> String {
    match state.user() {
        Some(user) => match &user.email {
            Some(email) => format!("{} <{email}>", user.name),
            None => user.name.clone(),
        },
        None => "Not signed in.".to_owned(),
    }
}
