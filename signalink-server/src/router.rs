use crate::config::RelayConfig;
use crate::room::RoomRegistry;
use crate::signaling::{SignalingService, ws_handler};
use anyhow::{Context, Result};
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Builds the relay's HTTP surface: `/ws` for signaling and `/health`.
pub fn router(service: SignalingService, cors_origin: Option<&str>) -> Result<Router> {
    let cors = match cors_origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("invalid CORS origin '{}'", origin))?;
            CorsLayer::new().allow_origin(origin)
        }
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods(Any)
    .allow_headers(Any);

    Ok(Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(|| async { "ok" }))
        .layer(cors)
        .with_state(service))
}

/// Runs the relay until Ctrl-C.
pub async fn serve(config: RelayConfig) -> Result<()> {
    let registry = Arc::new(RoomRegistry::new(config.room_capacity));
    info!("Rooms hold up to {} participants", registry.capacity());
    let service = SignalingService::new(registry, config.ice_servers());
    let app = router(service, config.cors_origin.as_deref())?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Signaling relay listening on ws://{}/ws", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("relay server error")?;

    info!("Signaling relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
