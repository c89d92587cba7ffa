//! Image drop zone with a file-picker fallback.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dropped files and picked files are handed to the same intake call. The
//! hidden file input is blanked whenever the intake clears, so picking the
//! same file again still fires a change event.

#[cfg(feature = "csr")]
use agriscan::intake::InputSource;
use leptos::prelude::*;

#[cfg(feature = "csr")]
use crate::state::Intake;
use crate::state::AppContext;

/// Read the first file off an input or drop event and stage it.
#[cfg(feature = "csr")]
fn stage_first(intake: Intake, source: InputSource, files: Option<web_sys::FileList>) {
    let Some(file) = crate::util::file::first_file(files) else {
        intake.set_drag_over(false);
        return;
    };
    leptos::task::spawn_local(async move {
        if let Err(e) = intake.select(source, &file).await {
            if e.is_silent() {
                log::debug!("selection ignored: {e}");
            } else {
                log::warn!("selection failed: {e}");
            }
        }
    });
}

#[component]
pub fn DropZone() -> impl IntoView {
    let intake = expect_context::<AppContext>().intake;
    let state = intake.state().signal();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move || {
        let resets = state.with(|s| s.input_resets);
        #[cfg(feature = "csr")]
        {
            if resets > 0 {
                if let Some(input) = input_ref.get() {
                    input.set_value("");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (resets, input_ref);
        }
    });

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            use wasm_bindgen::JsCast;
            let files = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files());
            stage_first(intake, InputSource::Picker, files);
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ev;
        }
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        #[cfg(feature = "csr")]
        {
            ev.prevent_default();
            let files = ev.data_transfer().and_then(|dt| dt.files());
            stage_first(intake, InputSource::Drop, files);
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ev;
            intake.set_drag_over(false);
        }
    };

    let on_drag_over = move |ev: leptos::ev::DragEvent| {
        #[cfg(feature = "csr")]
        {
            ev.prevent_default();
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = ev;
        }
        intake.set_drag_over(true);
    };

    let zone_class = move || {
        if state.with(|s| s.drag_over) { "drop-zone drop-zone--active" } else { "drop-zone" }
    };

    view! {
        <div
            class=zone_class
            on:dragover=on_drag_over
            on:dragleave=move |_| intake.set_drag_over(false)
            on:drop=on_drop
        >
            <input
                class="drop-zone__input"
                id="leaf-image"
                type="file"
                accept="image/*"
                node_ref=input_ref
                on:change=on_change
            />
            {move || match state.with(|s| s.preview().map(str::to_owned)) {
                Some(src) => {
                    view! {
                        <div class="drop-zone__preview">
                            <img src=src alt="Selected leaf"/>
                            <button class="drop-zone__clear" on:click=move |_| intake.clear()>
                                "Remove"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <label class="drop-zone__prompt" for="leaf-image">
                            <span>"Drag & drop a leaf photo here"</span>
                            <span class="drop-zone__hint">"or click to browse"</span>
                        </label>
                    }
                        .into_any()
                }
            }}
            <Show when=move || state.with(|s| s.decoding)>
                <p class="drop-zone__status">"Reading image..."</p>
            </Show>
        </div>
    }
}
