//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render application chrome (navigation, route guarding, toasts)
//! while reading shared state from Leptos context providers.

pub mod layout;
pub mod notice_tray;
pub mod protected_route;
