//! Route guard decisions shared by protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes must apply identical waiting and redirect behavior, so the
//! decision is a pure function of [`AuthState`] and the redirect effect is
//! installed from one place.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use super::navigation::LOGIN_PATH;
use crate::state::auth::AuthState;

/// What a protected route should render for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore has not finished; show the waiting indicator only.
    Wait,
    /// Signed in; show the protected content only.
    Render,
    /// Signed out; leave for the login page.
    Redirect,
}

pub fn guard_decision(state: &AuthState) -> GuardDecision {
    if state.loading {
        GuardDecision::Wait
    } else if state.is_authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect
    }
}

/// Redirect options that replace the current history entry, so the back
/// button cannot return to the protected view.
pub fn login_redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if guard_decision(&auth.get()) == GuardDecision::Redirect {
            navigate(LOGIN_PATH, login_redirect_options());
        }
    });
}
