//! HTTP and WebSocket server.
//!
//! Provides three endpoints:
//! - `/` - the bundled audit page
//! - `/test` - liveness check
//! - `/ws` - batch audits over a WebSocket
//!
//! CORS is permissive on every route.

mod handlers;
mod types;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use log::{info, warn};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::initialization::init_context;

use handlers::{index_handler, test_handler, ws_handler};
pub use types::{AppState, ServiceStatus};

/// Creates the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/test", get(test_handler))
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves on an already bound listener until `shutdown` is cancelled.
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("Server error")
}

/// Initializes shared resources, binds `config.bind:config.port` and serves
/// until Ctrl-C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let ctx = init_context(&config).context("Failed to initialize processing context")?;
    let state = AppState { ctx };

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| InitializationError::ServerBindError {
            addr: addr.clone(),
            source,
        })?;

    info!("Server listening on http://{}/", addr);
    info!("  - WebSocket: ws://{}/ws", addr);
    info!("  - Health: http://{}/test", addr);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown requested"),
            Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
        }
        signal.cancel();
    });

    serve_on(listener, state, shutdown).await
}
