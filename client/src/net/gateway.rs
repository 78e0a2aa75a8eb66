//! Single point of outbound request construction and inbound error handling.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call goes through [`Gateway::execute`]. The request stage
//! reads the bearer token from the persisted session store at dispatch time,
//! never from in-memory session state. The response stage turns a 401 on a
//! protected request into a session teardown plus redirect, then still fails
//! the caller's request so nothing hangs waiting on it.
//!
//! The wire is abstracted behind [`Transport`] so the gateway runs natively
//! in tests; the browser implementation lives in `net::fetch`.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::ErrorBody;
use crate::util::storage::SessionStore;

pub const STATUS_UNAUTHORIZED: u16 = 401;

/// HTTP verbs used by the backend API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Shape of one backend call, relative to the API base address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Option<String>,
    /// Whether a 401 reply tears the session down. Off for the credential
    /// endpoints, where 401 means "wrong password", not "session gone".
    pub intercept_unauthorized: bool,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, intercept_unauthorized: true }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?);
        Ok(self)
    }

    #[must_use]
    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Exempt this request from 401 session teardown.
    #[must_use]
    pub fn credential_exchange(mut self) -> Self {
        self.intercept_unauthorized = false;
        self
    }
}

/// A fully resolved request handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw reply from the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("request encoding failed: {0}")]
    Encode(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for showing to the user, when the failure carries one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Status { message: Some(message), .. } | Self::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

/// Sends resolved requests over the wire.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Callback run after a protected request is rejected with 401.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Configured client for the REST backend.
pub struct Gateway<T> {
    base_url: String,
    transport: T,
    store: SessionStore,
    on_unauthorized: UnauthorizedHook,
}

impl<T: Transport> Gateway<T> {
    pub fn new(base_url: &str, transport: T, store: SessionStore, on_unauthorized: UnauthorizedHook) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), transport, store, on_unauthorized }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dispatch `request` and return the raw 2xx response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] when the request never got a reply.
    /// - [`ApiError::Unauthorized`] for a 401 on a protected request, after
    ///   storage has been cleared and the unauthorized hook has run.
    /// - [`ApiError::Status`] for any other non-2xx reply.
    pub async fn execute(&self, request: ApiRequest) -> Result<HttpResponse, ApiError> {
        let intercept = request.intercept_unauthorized;
        let outgoing = self.prepare(request);
        let response = self.transport.send(outgoing).await?;
        self.inspect(intercept, response)
    }

    /// Dispatch `request` and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// Same as [`Gateway::execute`], plus [`ApiError::Decode`] for a body
    /// that does not match `R`.
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Dispatch `request` and discard the reply body.
    ///
    /// # Errors
    ///
    /// Same as [`Gateway::execute`].
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    /// Request stage: resolve the URL and attach headers.
    fn prepare(&self, request: ApiRequest) -> HttpRequest {
        let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
        if request.body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        match self.store.token() {
            Ok(Some(token)) => headers.push(("Authorization".to_owned(), format!("Bearer {token}"))),
            Ok(None) => {}
            Err(e) => leptos::logging::warn!("token lookup failed, sending anonymously: {e}"),
        }
        HttpRequest {
            method: request.method,
            url: join_url(&self.base_url, &request.path),
            query: request.query,
            headers,
            body: request.body,
        }
    }

    /// Response stage: map non-2xx replies onto [`ApiError`].
    fn inspect(&self, intercept: bool, response: HttpResponse) -> Result<HttpResponse, ApiError> {
        if response.is_success() {
            return Ok(response);
        }
        if response.status == STATUS_UNAUTHORIZED && intercept {
            leptos::logging::warn!("backend rejected session; signing out");
            if let Err(e) = self.store.clear() {
                leptos::logging::warn!("failed to clear session storage: {e}");
            }
            (self.on_unauthorized)();
            return Err(ApiError::Unauthorized);
        }
        Err(ApiError::Status { status: response.status, message: error_message(&response.body) })
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{base}/{}", path.trim_start_matches('/'))
}

/// Pull the optional `message` field out of an error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}
