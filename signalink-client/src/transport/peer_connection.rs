use anyhow::Result;
use async_trait::async_trait;
use signalink_core::{IceServerConfig, SdpKind};
use tokio::sync::mpsc;

use crate::media::LocalTrack;
use crate::transport::TransportEvent;

/// Everything a factory needs to build one connection.
#[derive(Debug, Clone)]
pub struct ConnectionContext {
    pub generation: u64,
    pub ice_servers: Vec<IceServerConfig>,
    pub events: mpsc::UnboundedSender<TransportEvent>,
}

/// The description/candidate surface of a peer-to-peer media transport.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    async fn add_track(&self, track: &LocalTrack) -> Result<()>;

    async fn create_offer(&self) -> Result<String>;

    async fn create_answer(&self) -> Result<String>;

    async fn set_local_description(&self, kind: SdpKind, sdp: String) -> Result<()>;

    async fn set_remote_description(&self, kind: SdpKind, sdp: String) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: String) -> Result<()>;

    /// Releases the connection and everything attached to it.
    async fn close(&self) -> Result<()>;
}

#[async_trait]
pub trait PeerConnectionFactory: Send + Sync {
    async fn create(&self, ctx: ConnectionContext) -> Result<Box<dyn PeerConnection>>;
}
