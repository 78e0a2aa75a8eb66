//! Session manager: owns authentication state and the sign-in lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`SessionManager`] is built at application start and handed to
//! components through Leptos context. It restores the persisted session once,
//! performs login/register through the gateway, tears the session down on
//! logout or on a 401, and reports every transition to a
//! [`SessionObserver`] (the UI binding writes them into signals).
//!
//! STATE MACHINE
//! =============
//! `Loading -> {Authenticated, Unauthenticated}` via [`SessionManager::restore`],
//! which runs once. Afterwards login/register move to `Authenticated` and
//! logout/expiry move to `Unauthenticated`. Failed sign-ins leave the state
//! untouched.
//!
//! CONCURRENCY
//! ===========
//! Only one login/register may be in flight; a second call is rejected with
//! [`SessionError::Busy`] instead of racing the first for the final state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leptos::prelude::*;

use super::auth::AuthState;
use super::notice::{Notice, NoticeState};
use crate::config::ClientConfig;
use crate::net::api;
use crate::net::fetch::FetchTransport;
use crate::net::gateway::{ApiError, ApiRequest, Gateway, Transport, UnauthorizedHook};
use crate::net::types::{AuthResponse, RegisterData, UserProfile};
use crate::util::navigation::Navigator;
use crate::util::storage::{KeyValueStore, SessionStore, StorageError, StoredSession};
use crate::util::token;

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_FAILURE: &str = "Login failed";
pub const REGISTER_SUCCESS: &str = "Registration successful!";
pub const REGISTER_FAILURE: &str = "Registration failed";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully";

/// The session manager used by the browser app.
pub type AppSession = SessionManager<FetchTransport>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Credentials rejected or the auth endpoint failed. Carries the
    /// backend's message, or a generic label when it sent none.
    #[error("{0}")]
    AuthFailure(String),
    /// Stored token elapsed or undecodable. Only seen during restore.
    #[error("session expired")]
    SessionExpired,
    #[error("unauthorized")]
    Unauthorized,
    #[error("a sign-in request is already in progress")]
    Busy,
    #[error("could not save session: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    fn from_api(err: &ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Unauthorized => Self::Unauthorized,
            other => Self::AuthFailure(other.user_message().unwrap_or(fallback).to_owned()),
        }
    }
}

/// Receives session transitions and user-facing notices.
pub trait SessionObserver: Send + Sync {
    fn state_changed(&self, state: &AuthState);
    fn notice(&self, notice: Notice);
}

struct SessionInner {
    store: SessionStore,
    state: Mutex<AuthState>,
    restored: AtomicBool,
    in_flight: AtomicBool,
    navigator: Arc<dyn Navigator>,
    observer: Arc<dyn SessionObserver>,
}

impl SessionInner {
    fn lock_state(&self) -> MutexGuard<'_, AuthState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: AuthState) {
        *self.lock_state() = next.clone();
        self.observer.state_changed(&next);
    }

    fn clear_store(&self) {
        if let Err(e) = self.store.clear() {
            leptos::logging::warn!("failed to clear session storage: {e}");
        }
    }

    fn teardown(&self) {
        self.clear_store();
        self.transition(AuthState::signed_out());
    }

    /// Forced sign-out after the backend rejected the session.
    fn expire(&self) {
        self.teardown();
        self.navigator.to_login();
    }
}

/// Clears the in-flight flag when a sign-in attempt ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Authentication state plus the operations that change it.
pub struct SessionManager<T> {
    inner: Arc<SessionInner>,
    gateway: Arc<Gateway<T>>,
}

impl<T> Clone for SessionManager<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), gateway: Arc::clone(&self.gateway) }
    }
}

impl<T: Transport> SessionManager<T> {
    /// Build the manager and its gateway. The gateway's 401 hook is wired
    /// back into this manager's teardown.
    pub fn new(
        config: &ClientConfig,
        transport: T,
        storage: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        let store = SessionStore::new(storage);
        let inner = Arc::new(SessionInner {
            store: store.clone(),
            state: Mutex::new(AuthState::default()),
            restored: AtomicBool::new(false),
            in_flight: AtomicBool::new(false),
            navigator,
            observer,
        });
        let hook_inner = Arc::clone(&inner);
        let on_unauthorized: UnauthorizedHook = Arc::new(move || hook_inner.expire());
        let gateway = Arc::new(Gateway::new(&config.api_base_url, transport, store, on_unauthorized));
        Self { inner, gateway }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.inner.lock_state().clone()
    }

    /// Gateway for backend calls outside the auth endpoints.
    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    /// Startup reconciliation against the wall clock.
    pub fn restore(&self) -> AuthState {
        self.restore_at(token::now_secs())
    }

    /// Startup reconciliation: adopt the stored profile if its token has not
    /// expired at `now_secs`, otherwise clear storage. Runs once; later calls
    /// return the current state unchanged.
    pub fn restore_at(&self, now_secs: f64) -> AuthState {
        if self.inner.restored.swap(true, Ordering::AcqRel) {
            return self.state();
        }
        let user = match self.inner.store.read() {
            Ok(Some(stored)) => match live_user(stored, now_secs) {
                Ok(user) => Some(user),
                Err(e) => {
                    leptos::logging::log!("discarding stored session: {e}");
                    self.inner.clear_store();
                    None
                }
            },
            Ok(None) => {
                // Drop a lone token or profile left by an interrupted write.
                self.inner.clear_store();
                None
            }
            Err(e) => {
                leptos::logging::warn!("stored session unreadable: {e}");
                self.inner.clear_store();
                None
            }
        };
        let next = AuthState { user, loading: false };
        self.inner.transition(next.clone());
        next
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Busy`] while another sign-in is pending.
    /// - [`SessionError::AuthFailure`] when the backend rejects the attempt.
    /// - [`SessionError::Storage`] when the session cannot be persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, SessionError> {
        self.sign_in(api::auth::login(email, password), LOGIN_SUCCESS, LOGIN_FAILURE)
            .await
    }

    /// Create an account and sign in with it.
    ///
    /// # Errors
    ///
    /// Same as [`SessionManager::login`]; missing required fields fail as
    /// [`SessionError::AuthFailure`] without a network call.
    pub async fn register(&self, data: &RegisterData) -> Result<UserProfile, SessionError> {
        self.sign_in(api::auth::register(data), REGISTER_SUCCESS, REGISTER_FAILURE)
            .await
    }

    /// Clear the session. Never fails and makes no network call.
    pub fn logout(&self) {
        self.inner.teardown();
        self.inner.observer.notice(Notice::success(LOGOUT_SUCCESS));
    }

    /// Forced teardown plus redirect to the login page.
    pub fn expire(&self) {
        self.inner.expire();
    }

    async fn sign_in(
        &self,
        request: Result<ApiRequest, ApiError>,
        success: &str,
        failure: &str,
    ) -> Result<UserProfile, SessionError> {
        let _in_flight = self.begin()?;
        let outcome = match request {
            Ok(request) => self.gateway.send_json::<AuthResponse>(request).await,
            Err(e) => Err(e),
        };
        let response = outcome.map_err(|e| self.fail(SessionError::from_api(&e, failure)))?;
        self.inner
            .store
            .write(&response.token, &response.user)
            .map_err(|e| self.fail(SessionError::Storage(e)))?;
        self.inner.transition(AuthState::signed_in(response.user.clone()));
        self.inner.observer.notice(Notice::success(success));
        Ok(response.user)
    }

    fn begin(&self) -> Result<InFlight<'_>, SessionError> {
        if self.inner.in_flight.swap(true, Ordering::AcqRel) {
            leptos::logging::warn!("sign-in ignored: another request is pending");
            return Err(SessionError::Busy);
        }
        Ok(InFlight(&self.inner.in_flight))
    }

    fn fail(&self, err: SessionError) -> SessionError {
        leptos::logging::warn!("sign-in failed: {err}");
        self.inner.observer.notice(Notice::error(err.to_string()));
        err
    }
}

fn live_user(stored: StoredSession, now_secs: f64) -> Result<UserProfile, SessionError> {
    if token::is_live(&stored.token, now_secs) {
        Ok(stored.user)
    } else {
        Err(SessionError::SessionExpired)
    }
}

/// [`SessionObserver`] that mirrors the session into Leptos signals.
#[derive(Clone, Copy)]
pub struct ContextObserver {
    pub auth: RwSignal<AuthState>,
    pub notices: RwSignal<NoticeState>,
}

impl SessionObserver for ContextObserver {
    fn state_changed(&self, state: &AuthState) {
        self.auth.set(state.clone());
    }

    fn notice(&self, notice: Notice) {
        let id = self.notices.try_update(|n| n.push(notice));
        #[cfg(feature = "hydrate")]
        if let Some(id) = id {
            let notices = self.notices;
            leptos::task::spawn_local(async move {
                let ttl = std::time::Duration::from_millis(u64::from(super::notice::NOTICE_TTL_MS));
                gloo_timers::future::sleep(ttl).await;
                notices.try_update(|n| n.dismiss(id));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    }
}
