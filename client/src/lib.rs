//! # client
//!
//! Leptos + WASM front end for the appointment booking application.
//!
//! This crate contains the session manager, the HTTP gateway to the REST
//! backend, route guarding, the navigation shell, and the route-level pages.
//! Everything outside the `hydrate` feature gate is plain Rust and is tested
//! natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;

/// Browser entry point: installs console logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
