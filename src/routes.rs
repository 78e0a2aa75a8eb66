//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the Leptos SSR pages, the compiled WASM/CSS bundle
//! under `/pkg`, a `/healthz` probe, and, when configured, the `/api/*`
//! reverse proxy to the REST backend.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, HostConfig};
use crate::proxy::{self, ProxyState};

/// Health probe plus the optional API proxy.
///
/// # Errors
///
/// Returns an error if the proxy HTTP client cannot be built.
pub fn service_routes(config: &HostConfig) -> Result<Router, ConfigError> {
    let router = Router::new().route("/healthz", get(healthz));
    let Some(target) = config.proxy_target.as_deref() else {
        return Ok(router);
    };
    let state = ProxyState::new(target).map_err(|e| ConfigError::ProxyClient(e.to_string()))?;
    tracing::info!(%target, "proxying /api");
    Ok(router.merge(
        Router::new()
            .route("/api/{*rest}", any(proxy::forward))
            .with_state(state),
    ))
}

/// Full application: service routes, Leptos SSR, and static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section) or the proxy
/// client cannot be built.
pub fn app(config: &HostConfig) -> Result<Router, ConfigError> {
    let conf = get_configuration(None).map_err(|e| ConfigError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(service_routes(config)?
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
