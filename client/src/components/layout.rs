//! Navigation shell wrapping every protected page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the top bar (brand, role-aware links, current user, logout) and an
//! `Outlet` for the nested route. Links are derived from the user's role by
//! [`nav_links`] so visibility rules live in one testable place.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Outlet;
use leptos_router::hooks::{use_location, use_navigate};

use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::state::session::AppSession;
use crate::util::navigation::LOGIN_PATH;

/// One entry in the top navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const DASHBOARD: NavLink = NavLink { href: "/", label: "Dashboard" };
const BOOK: NavLink = NavLink { href: "/bookings", label: "Book Appointment" };
const APPOINTMENTS: NavLink = NavLink { href: "/appointments", label: "My Appointments" };
const SCHEDULE: NavLink = NavLink { href: "/schedule", label: "My Schedule" };
const ADMIN: NavLink = NavLink { href: "/admin", label: "Admin" };

/// Links visible to `role`. Schedule is staff-only; admin is admin-only.
pub fn nav_links(role: Option<Role>) -> Vec<NavLink> {
    let mut links = vec![DASHBOARD, BOOK, APPOINTMENTS];
    match role {
        Some(Role::Staff) => links.push(SCHEDULE),
        Some(Role::Admin) => links.push(ADMIN),
        Some(Role::User) | None => {}
    }
    links
}

/// CSS class for a nav link, highlighting the one matching `pathname`.
pub fn nav_link_class(href: &str, pathname: &str) -> &'static str {
    if href == pathname { "nav-link nav-link--active" } else { "nav-link" }
}

#[component]
pub fn Layout() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    let location = use_location();
    let navigate = use_navigate();

    let role = move || auth.get().user.map(|u| u.role);
    let display_name = move || auth.get().user.map(|u| u.display_name()).unwrap_or_default();
    let role_badge = move || role().map(Role::label).unwrap_or_default();

    let on_logout = move |_| {
        session.logout();
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <div class="app-shell">
            <nav class="app-nav">
                <div class="app-nav__brand">
                    <span class="app-nav__logo">"📅"</span>
                    <span class="app-nav__title">"AppointmentHub"</span>
                </div>
                <div class="app-nav__links">
                    {move || {
                        let pathname = location.pathname.get();
                        nav_links(role())
                            .into_iter()
                            .map(|link| {
                                view! {
                                    <a href=link.href class=nav_link_class(link.href, &pathname)>
                                        {link.label}
                                    </a>
                                }
                            })
                            .collect_view()
                    }}
                </div>
                <div class="app-nav__user">
                    <span class="app-nav__name">{display_name}</span>
                    <span class="app-nav__role">{role_badge}</span>
                    <button class="app-nav__logout" on:click=on_logout>
                        "Logout"
                    </button>
                </div>
            </nav>
            <main class="app-main">
                <Outlet/>
            </main>
        </div>
    }
}
