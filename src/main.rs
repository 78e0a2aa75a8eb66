mod config;
mod proxy;
mod routes;

#[tokio::main]
async fn main() {
    // A missing .env file is normal outside local development.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::HostConfig::from_env().expect("invalid configuration");
    let app = routes::app(&config).expect("router init failed");

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, proxy = config.proxy_target.as_deref().unwrap_or("off"), "appointhub listening");
    axum::serve(listener, app).await.expect("server failed");
}
