//! Same-origin `/api/*` reverse proxy to the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! When `API_PROXY_TARGET` is set the browser bundle can talk to `/api` on the
//! host it was served from. Requests are buffered, forwarded with `reqwest`,
//! and the upstream status, headers, and body are passed back unchanged apart
//! from hop-by-hop headers.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{HeaderMap, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    #[error("request body rejected: {0}")]
    Body(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Body(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ClientBuild(_) | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

/// Shared proxy handle stored as router state.
#[derive(Clone)]
pub struct ProxyState {
    inner: Arc<ProxyInner>,
}

struct ProxyInner {
    http: reqwest::Client,
    target: String,
}

impl ProxyState {
    /// `target` is an origin such as `http://localhost:8081`; the incoming
    /// path and query are appended to it unchanged.
    pub fn new(target: impl Into<String>) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ProxyError::ClientBuild(e.to_string()))?;
        Ok(Self { inner: Arc::new(ProxyInner { http, target: target.into() }) })
    }

    pub fn target(&self) -> &str {
        &self.inner.target
    }
}

/// Join the target origin with the request's path and query.
pub fn upstream_url(target: &str, path_and_query: &str) -> String {
    format!("{}/{}", target.trim_end_matches('/'), path_and_query.trim_start_matches('/'))
}

/// Connection-scoped headers that must not cross the proxy, plus the ones
/// `reqwest` and `hyper` recompute.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
            | "host"
            | "content-length"
    )
}

fn forwardable(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Axum handler for `/api/{*rest}`.
pub async fn forward(State(proxy): State<ProxyState>, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
    let url = upstream_url(proxy.target(), path_and_query);

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    let upstream = proxy
        .inner
        .http
        .request(parts.method.clone(), &url)
        .headers(forwardable(&parts.headers))
        .body(bytes)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(method = %parts.method, %url, error = %e, "proxy upstream request failed");
            ProxyError::Upstream(e.to_string())
        })?;

    let status = upstream.status();
    let headers = forwardable(upstream.headers());
    let payload = upstream
        .bytes()
        .await
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;
    tracing::debug!(method = %parts.method, %url, status = status.as_u16(), "proxied");

    let mut response = Response::new(Body::from(payload));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
