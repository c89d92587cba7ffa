//! Home page: stage a leaf photo, submit it, read the diagnosis.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `RequireAuth`. The drop zone feeds the intake controller;
//! the analyze button hands the staged artifact to the submission
//! controller, whose state decides between the upload view and the report.

use agriscan::submission::SubmissionState;
use agriscan::types::greeting_name;
use leptos::prelude::*;

use crate::components::diagnosis_card::DiagnosisCard;
use crate::components::drop_zone::DropZone;
use crate::state::AppContext;

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let session = ctx.session.state().signal();
    let intake = ctx.intake.state().signal();
    let submission = ctx.submission.state().signal();

    let greeting = move || session.with(|s| format!("Hello, {}", greeting_name(s.user())));
    let loading = move || submission.with(SubmissionState::loading);
    let has_artifact = move || intake.with(|s| s.artifact.is_some());

    let on_analyze = move |_| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let backend = ctx.backend();
            let artifact = ctx.intake.artifact();
            if let Some(Err(e)) = ctx.submission.submit(&backend, &ctx.session, artifact.as_ref()).await {
                log::debug!("analysis failed: {e}");
            }
        });
    };

    view! {
        <section class="home">
            <header class="home__header">
                <h1>{greeting}</h1>
                <p>"Upload a photo of a leaf to check its health."</p>
            </header>
            <Show
                when=move || submission.with(|s| s.result().is_none())
                fallback=|| view! { <DiagnosisCard/> }
            >
                <DropZone/>
                <Show when=move || submission.with(|s| s.error().is_some())>
                    <div class="home__error" role="alert">
                        <span>{move || submission.with(|s| s.error().unwrap_or_default().to_owned())}</span>
                        <button class="home__dismiss" on:click=move |_| ctx.submission.dismiss_error()>
                            "Dismiss"
                        </button>
                    </div>
                </Show>
                <button
                    class="home__analyze"
                    disabled=move || loading() || !has_artifact()
                    on:click=on_analyze
                >
                    {move || if loading() { "Analyzing..." } else { "Analyze Plant" }}
                </button>
            </Show>
        </section>
    }
}
