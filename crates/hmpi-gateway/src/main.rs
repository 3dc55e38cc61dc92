//! HMPI service binary.
//!
//! Config path comes from `HMPI_CONFIG` (default `hmpi.yaml`); a missing file
//! runs with built-in defaults.

use tracing_subscriber::{fmt, EnvFilter};

use hmpi_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::var("HMPI_CONFIG").unwrap_or_else(|_| "hmpi.yaml".into());
    let cfg = config::load_or_default(&path).expect("config load failed");
    let listen = cfg.server.socket_addr().expect("server.listen validated on load");

    let state = app_state::AppState::new(cfg).expect("app state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "hmpi-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
