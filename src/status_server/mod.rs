//! HTTP status server exposing the result store.
//!
//! Provides:
//! - `/api/stats` - statistics and category sizes
//! - `/api/history` - newest-first verdicts (`?limit=&status=success|failed`)
//! - `/api/urls/:category` - URLs in one category
//! - `/api/url` - lookup of one URL (`?url=`)
//! - `/api/reset` (POST) - clear the store
//! - `/metrics` - Prometheus-compatible metrics
//!
//! The server runs in the background and never blocks validation. It only
//! reads the store, apart from reset.

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::error_handling::InitializationError;
use handlers::{
    history_handler, metrics_handler, reset_handler, stats_handler, url_handler, urls_handler,
};
pub use types::StatusState;

/// Builds the status router over `state`.
pub fn router(state: StatusState) -> Router {
    Router::new()
        .route("/api/stats", get(stats_handler))
        .route("/api/history", get(history_handler))
        .route("/api/urls/:category", get(urls_handler))
        .route("/api/url", get(url_handler))
        .route("/api/reset", post(reset_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Binds the status server on 127.0.0.1.
///
/// # Errors
///
/// Returns `InitializationError::StatusServerBindError` if the port is taken.
pub async fn bind_status_server(port: u16) -> Result<TcpListener, InitializationError> {
    TcpListener::bind(("127.0.0.1", port))
        .await
        .map_err(|source| InitializationError::StatusServerBindError { port, source })
}

/// Serves the status API on an already bound listener until it fails.
pub async fn serve_status(listener: TcpListener, state: StatusState) -> Result<(), anyhow::Error> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Status server listening on http://{}/", addr);
        log::info!("  - Stats: http://{}/api/stats", addr);
        log::info!("  - Metrics: http://{}/metrics", addr);
    }

    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("Status server error: {}", e))?;

    Ok(())
}
