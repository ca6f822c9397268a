use anyhow::Context;
use tracing::{info, warn};

use crate::app::{app, AppState};
use crate::cli::open_database;
use crate::{config, is_production};

/// Serve the HTTP API until Ctrl-C, then close the pool
pub async fn handle(port: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    info!("Starting Staff Review API in {:?} mode", config.environment);

    if is_production!() && config.security.jwt_secret.is_empty() {
        warn!("JWT_SECRET is not set; logins will fail");
    }

    let db = open_database().await?;

    let port = port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Staff Review API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(db.clone())))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
