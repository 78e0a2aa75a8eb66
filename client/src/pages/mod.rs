//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! `login` and `signup` are public routes. Everything else renders inside the
//! guarded `Layout` and can assume a signed-in user in context.

pub mod admin;
pub mod appointments;
pub mod booking;
pub mod dashboard;
pub mod login;
pub mod schedule;
pub mod signup;

use leptos::prelude::*;

/// Heading plus a single card of body text.
#[component]
pub(crate) fn PageCard(title: &'static str, body: &'static str) -> impl IntoView {
    view! {
        <div class="page">
            <h1 class="page__title">{title}</h1>
            <div class="page-card">
                <p class="page-card__text">{body}</p>
            </div>
        </div>
    }
}
