
use std::sync::Arc;

use tracing::Level;

use signalink_core::utils::default_ice_servers;
use signalink_server::{RoomRegistry, SignalingService};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_relay() -> SignalingService {
    SignalingService::new(Arc::new(RoomRegistry::default()), default_ice_servers())
}
