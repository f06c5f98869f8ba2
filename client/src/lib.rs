#![recursion_limit = "256"]
//! # client
//!
//! Leptos + WASM portal for the device manual console. Two portals share one
//! bundle: the admin portal imports and annotates PDF manuals, the client
//! portal lets signed-in or anonymous users chat with a device's manual.
//!
//! The server renders the shell (`ssr` feature); the browser hydrates it and
//! talks to the REST backend directly (`hydrate` feature).

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // A second init only happens on hot reload; the first logger stays active.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
