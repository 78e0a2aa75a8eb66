//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::components::layout::Layout;
use crate::components::notice_tray::NoticeTray;
use crate::components::protected_route::ProtectedRoute;
use crate::config::ClientConfig;
use crate::net::fetch::FetchTransport;
use crate::pages::{
    admin::AdminPage, appointments::AppointmentsPage, booking::BookingPage, dashboard::DashboardPage,
    login::LoginPage, schedule::SchedulePage, signup::SignupPage,
};
use crate::state::auth::AuthState;
use crate::state::notice::NoticeState;
use crate::state::session::{AppSession, ContextObserver};
use crate::util::navigation::BrowserNavigator;
use crate::util::storage::LocalStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth and notice signals plus the session manager, restores
/// any persisted session once the browser takes over, and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let notices = RwSignal::new(NoticeState::default());
    let session = AppSession::new(
        &ClientConfig::from_build_env(),
        FetchTransport,
        Arc::new(LocalStorage),
        Arc::new(BrowserNavigator),
        Arc::new(ContextObserver { auth, notices }),
    );

    provide_context(auth);
    provide_context(notices);
    provide_context(session.clone());

    // Effects only run in the browser, so SSR output stays in the loading state.
    Effect::new(move || {
        session.restore();
    });

    view! {
        <Title text="AppointmentHub"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <ParentRoute
                    path=StaticSegment("")
                    view=|| {
                        view! {
                            <ProtectedRoute>
                                <Layout/>
                            </ProtectedRoute>
                        }
                    }
                >
                    <Route path=StaticSegment("") view=DashboardPage/>
                    <Route path=StaticSegment("bookings") view=BookingPage/>
                    <Route path=StaticSegment("appointments") view=AppointmentsPage/>
                    <Route path=StaticSegment("schedule") view=SchedulePage/>
                    <Route path=StaticSegment("admin") view=AdminPage/>
                </ParentRoute>
            </Routes>
        </Router>
        <NoticeTray/>
    }
}
