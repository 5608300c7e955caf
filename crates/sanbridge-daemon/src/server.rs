//! Status server setup and lifecycle

use anyhow::Result;
use axum::{routing::get, Router};
use sanbridge_attach::{run_notify_loop, LogObserver};
use std::sync::Arc;
use tracing::info;

use crate::api;
use crate::state::AppState;

/// Build the status router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/surface/BAT1", get(api::bat1))
        .route("/surface/BAT2", get(api::bat2))
        .route("/surface/ADP1", get(api::adp1))
        .route("/surface/version", get(api::version))
        .with_state(state)
}

/// Run the status server until shutdown, then tear the endpoints down.
pub async fn run(state: Arc<AppState>, bind: &str) -> Result<()> {
    let app = router(state.clone());

    // Forward firmware notifications in the background
    let observer = Arc::new(LogObserver);
    tokio::spawn(run_notify_loop(state.bus.notifications(), observer));

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(address = %bind, "Starting status server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Process shutdown is device removal
    state.detach().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Shutdown signal unavailable, running until killed");
        std::future::pending::<()>().await;
    }
}
