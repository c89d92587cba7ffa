//! Diagnosis report for the latest prediction.

#[cfg(test)]
#[path = "diagnosis_card_test.rs"]
mod diagnosis_card_test;

use agriscan::types::{PredictionResult, PredictionStatus, REMEDIATION_ADVICE};
use leptos::prelude::*;

use crate::state::AppContext;

/// CSS modifier for the status badge.
pub(crate) fn status_tone(status: PredictionStatus) -> &'static str {
    match status {
        PredictionStatus::Success => "healthy",
        PredictionStatus::Warning => "warning",
        PredictionStatus::Rejected => "rejected",
    }
}

pub(crate) fn status_heading(status: PredictionStatus) -> &'static str {
    match status {
        PredictionStatus::Success => "Healthy",
        PredictionStatus::Warning => "Disease Detected",
        PredictionStatus::Rejected => "Unrecognized Image",
    }
}

/// Body of the remediation panel, or `None` for a clean result.
pub(crate) fn remediation_text(result: &PredictionResult) -> Option<String> {
    if !result.needs_remediation() {
        return None;
    }
    Some(match result.details.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(details) => format!("{details} {REMEDIATION_ADVICE}"),
        None => REMEDIATION_ADVICE.to_owned(),
    })
}

#[component]
pub fn DiagnosisCard() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let submission = ctx.submission.state().signal();
    let intake = ctx.intake.state().signal();
    let preview = move || intake.with(|s| s.preview().unwrap_or_default().to_owned());

    let on_scan_another = move |_| {
        ctx.submission.reset();
        ctx.intake.clear();
    };

    move || {
        submission.with(|s| s.result().cloned()).map(|result| {
            let tone = status_tone(result.status);
            let remediation = remediation_text(&result);
            view! {
                <article class=format!("diagnosis diagnosis--{tone}")>
                    <img class="diagnosis__image" src=preview alt="Analyzed leaf"/>
                    <div class="diagnosis__body">
                        <span class=format!("diagnosis__badge diagnosis__badge--{tone}")>
                            {status_heading(result.status)}
                        </span>
                        <h2 class="diagnosis__label">{result.label()}</h2>
                        <p class="diagnosis__confidence">
                            "Confidence: " <strong>{result.confidence_text()}</strong>
                        </p>
                        {remediation.map(|text| {
                            view! {
                                <section class="diagnosis__remediation">
                                    <h3>"Recommended Action"</h3>
                                    <p>{text}</p>
                                </section>
                            }
                        })}
                        <button class="diagnosis__again" on:click=on_scan_another>
                            "Scan Another Plant"
                        </button>
                    </div>
                </article>
            }
        })
    }
}
