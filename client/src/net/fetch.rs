//! Browser transport backed by `fetch`.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every send fails, since the session token only exists
//! in the browser and the backend is never called during rendering.

use super::gateway::{ApiError, HttpRequest, HttpResponse, Transport};

/// [`Transport`] over the browser `fetch` API.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            send_fetch(request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Transport("not available on server".to_owned()))
        }
    }
}

#[cfg(feature = "hydrate")]
async fn send_fetch(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    use super::gateway::Method;
    use gloo_net::http::Request;

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Patch => Request::patch(&request.url),
        Method::Delete => Request::delete(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if !request.query.is_empty() {
        builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    let outgoing = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Transport(e.to_string()))?;

    let resp = outgoing
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Ok(HttpResponse { status, body })
}
