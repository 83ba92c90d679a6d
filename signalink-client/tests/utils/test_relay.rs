use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;

use signalink_core::utils::default_ice_servers;
use signalink_server::{RoomRegistry, SignalingService, router};

/// Binds a relay on an ephemeral localhost port and returns its `/ws` URL.
pub async fn spawn_relay() -> Result<String> {
    let service = SignalingService::new(Arc::new(RoomRegistry::default()), default_ice_servers());
    let app = router(service, None)?;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("[TestRelay] server error: {}", e);
        }
    });

    Ok(format!("ws://{}/ws", addr))
}
