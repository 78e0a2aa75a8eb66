//! Shared fakes for session and gateway tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use futures::channel::oneshot;

use crate::net::gateway::{ApiError, HttpRequest, HttpResponse, Transport};
use crate::net::types::{Role, UserProfile};
use crate::state::auth::AuthState;
use crate::state::notice::Notice;
use crate::state::session::SessionObserver;
use crate::util::navigation::Navigator;

/// Unsigned JWT-shaped token with the given raw payload.
pub fn jwt_with_payload(payload: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload);
    format!("{header}.{body}.signature")
}

pub fn jwt_with_exp(exp: f64) -> String {
    jwt_with_payload(&format!(r#"{{"sub":"a@b.com","exp":{exp}}}"#))
}

pub fn sample_user(role: Role) -> UserProfile {
    UserProfile {
        id: 42,
        email: "a@b.com".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        role,
        phone: None,
        timezone: None,
    }
}

pub fn json_response(status: u16, body: &serde_json::Value) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse { status, body: body.to_string() })
}

/// Transport that replays queued responses and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Result<HttpResponse, ApiError>>>>,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
    gate: Arc<Mutex<Option<oneshot::Receiver<()>>>>,
}

impl ScriptedTransport {
    pub fn reply(&self, reply: Result<HttpResponse, ApiError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// Hold the next send until the returned sender fires.
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.lock().unwrap().push(request);
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_owned())))
    }
}

/// Observer that keeps every state snapshot and notice.
#[derive(Default)]
pub struct RecordingObserver {
    pub states: Mutex<Vec<AuthState>>,
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingObserver {
    pub fn last_state(&self) -> Option<AuthState> {
        self.states.lock().unwrap().last().cloned()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl SessionObserver for RecordingObserver {
    fn state_changed(&self, state: &AuthState) {
        self.states.lock().unwrap().push(state.clone());
    }

    fn notice(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Navigator that counts login redirects.
#[derive(Default)]
pub struct CountingNavigator {
    pub redirects: AtomicUsize,
}

impl CountingNavigator {
    pub fn count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}
