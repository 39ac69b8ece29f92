use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::error::ServeError;

/// Binds `address` and serves `router` until Ctrl-C.
pub async fn serve(address: SocketAddr, router: Router) -> Result<(), ServeError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ServeError::Bind { address, source })?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "roster listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("roster stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(error) => tracing::error!(%error, "failed to listen for shutdown signal"),
    }
}
