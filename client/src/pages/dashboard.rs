//! Dashboard page: the authenticated landing route.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::layout::{NavLink, nav_links};
use crate::net::types::UserProfile;
use crate::state::auth::AuthState;

/// Welcome line for the signed-in user.
fn greeting(user: Option<&UserProfile>) -> String {
    match user.map(|u| u.first_name.trim()).filter(|name| !name.is_empty()) {
        Some(name) => format!("Welcome back, {name}!"),
        None => "Welcome back!".to_owned(),
    }
}

/// Shortcut cards: every nav destination except the dashboard itself.
fn shortcuts(user: Option<&UserProfile>) -> Vec<NavLink> {
    nav_links(user.map(|u| u.role))
        .into_iter()
        .filter(|link| link.href != "/")
        .collect()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let title = move || auth.with(|a| greeting(a.user.as_ref()));
    let links = move || auth.with(|a| shortcuts(a.user.as_ref()));

    view! {
        <div class="page">
            <h1 class="page__title">{title}</h1>
            <div class="dashboard-grid">
                {move || {
                    links()
                        .into_iter()
                        .map(|link| {
                            view! {
                                <a class="dashboard-card" href=link.href>
                                    {link.label}
                                </a>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
