//! History page: past diagnoses with per-entry delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `RequireAuth`. Loads once on mount; entries are removed
//! only after the server confirms the delete, so the list never shows a
//! deletion that did not happen.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use agriscan::types::{HistoryEntry, HistoryId};
use leptos::prelude::*;

use crate::state::AppContext;

/// CSS modifier for the confidence badge.
pub(crate) fn confidence_tone(entry: &HistoryEntry) -> &'static str {
    if entry.is_high_confidence() { "high" } else { "low" }
}

#[component]
fn HistoryRow(entry: HistoryEntry, on_delete: Callback<HistoryId>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let state = ctx.history.state().signal();
    let id = entry.id;
    let thumbnail = ctx.backend().config().upload_url(&entry.image_path);
    let tone = confidence_tone(&entry);
    let label = agriscan::types::humanize_label(&entry.prediction);

    view! {
        <li class="history-row">
            <img class="history-row__thumb" src=thumbnail alt=label.clone()/>
            <div class="history-row__body">
                <h3 class="history-row__label">{label}</h3>
                <span class="history-row__date">{entry.date_label()}</span>
            </div>
            <span class=format!("history-row__badge history-row__badge--{tone}")>{entry.confidence_text()}</span>
            <button
                class="history-row__delete"
                disabled=move || state.with(|s| s.is_deleting(id))
                on:click=move |_| on_delete.run(id)
            >
                "Delete"
            </button>
        </li>
    }
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let state = ctx.history.state().signal();

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let backend = ctx.backend();
        if let Err(e) = ctx.history.load(&backend, &ctx.session).await {
            log::debug!("history not loaded: {e}");
        }
    });

    let on_delete = Callback::new(move |id: HistoryId| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let backend = ctx.backend();
            let confirm = crate::util::dialog::confirm;
            if let Err(e) = ctx.history.delete(&backend, &ctx.session, &confirm, id).await {
                log::debug!("delete {id} not applied: {e}");
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
        }
    });

    view! {
        <section class="history">
            <header class="history__header">
                <h1>"Scan History"</h1>
                <a href="/" class="history__new">"New Scan"</a>
            </header>
            <Show when=move || state.with(|s| s.notice.is_some())>
                <div class="history__notice" role="alert">
                    <span>{move || state.with(|s| s.notice.clone().unwrap_or_default())}</span>
                    <button on:click=move |_| ctx.history.dismiss_notice()>"Dismiss"</button>
                </div>
            </Show>
            {move || {
                let (loading, empty) = state.with(|s| (s.loading, s.entries.is_empty()));
                if loading && empty {
                    view! { <p class="history__status">"Loading history..."</p> }.into_any()
                } else if empty {
                    view! {
                        <p class="history__empty">"No scans yet. Analyze a plant to start your history."</p>
                    }
                        .into_any()
                } else {
                    view! {
                        <ul class="history__list">
                            <For
                                each=move || state.with(|s| s.entries.clone())
                                key=|entry| entry.id
                                let:entry
                            >
                                <HistoryRow entry=entry on_delete=on_delete/>
                            </For>
                        </ul>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
