//! Out-of-router navigation.
//!
//! The gateway runs outside any component, so it cannot use the router's
//! `use_navigate`. A forced sign-out does a full document navigation
//! instead, which also drops any page state built for the old session.

/// Entry point unauthenticated users are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Sends the browser to the login entry point.
pub trait Navigator: Send + Sync {
    fn to_login(&self);
}

/// [`Navigator`] that assigns `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn to_login(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(LOGIN_PATH);
            }
        }
    }
}
