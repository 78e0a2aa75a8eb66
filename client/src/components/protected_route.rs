//! Route guard component.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, guard_decision, install_unauth_redirect};

/// Renders `children` only for a signed-in user.
///
/// While the session is still being restored a spinner is shown instead;
/// once settled without a user, the guard replaces the history entry with
/// `/login`.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let decision = Memo::new(move |_| guard_decision(&auth.get()));

    move || match decision.get() {
        GuardDecision::Wait => view! {
            <div class="route-wait">
                <div class="route-wait__spinner"></div>
            </div>
        }
        .into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::Redirect => ().into_any(),
    }
}
