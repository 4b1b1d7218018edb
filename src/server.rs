//! Listener setup and graceful shutdown for the service binaries.

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Serves `app` on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns the I/O error raised while binding or serving.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => warn!(error = %err, "cannot listen for shutdown signal"),
    }
}
