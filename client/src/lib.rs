//! # agriscan-client
//!
//! Leptos + WASM frontend for the AgriScan crop-diagnosis service.
//!
//! This crate contains pages, components, the reactive state adapters, and
//! the browser implementations of the core seams: `fetch` for the backend,
//! `localStorage` for the session, and `File` for image intake. The
//! controllers themselves live in the `agriscan` core crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
