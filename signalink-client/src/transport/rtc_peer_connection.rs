use anyhow::{Context, Result};
use async_trait::async_trait;
use signalink_core::utils::default_ice_servers;
use signalink_core::{IceServerConfig, SdpKind};
use std::sync::Arc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::track::track_local::TrackLocal;

use crate::media::LocalTrack;
use crate::transport::{
    ConnectionContext, ConnectionStatus, PeerConnection, PeerConnectionFactory, TransportEvent,
};

/// Builds [`RtcPeerConnection`]s backed by the `webrtc` crate.
#[derive(Debug, Clone, Default)]
pub struct RtcConnectionFactory;

#[async_trait]
impl PeerConnectionFactory for RtcConnectionFactory {
    async fn create(&self, ctx: ConnectionContext) -> Result<Box<dyn PeerConnection>> {
        Ok(Box::new(RtcPeerConnection::new(ctx).await?))
    }
}

pub struct RtcPeerConnection {
    peer_connection: Arc<RTCPeerConnection>,
}

fn to_rtc_ice_servers(servers: &[IceServerConfig]) -> Vec<RTCIceServer> {
    servers
        .iter()
        .map(|server| RTCIceServer {
            urls: server.urls.clone(),
            username: server.username.clone().unwrap_or_default(),
            credential: server.credential.clone().unwrap_or_default(),
        })
        .collect()
}

fn to_description(kind: SdpKind, sdp: String) -> Result<RTCSessionDescription> {
    let desc = match kind {
        SdpKind::Offer => RTCSessionDescription::offer(sdp)?,
        SdpKind::Answer => RTCSessionDescription::answer(sdp)?,
    };
    Ok(desc)
}

impl RtcPeerConnection {
    pub async fn new(ctx: ConnectionContext) -> Result<Self> {
        let ConnectionContext {
            generation,
            ice_servers,
            events,
        } = ctx;

        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let ice_servers = if ice_servers.is_empty() {
            default_ice_servers()
        } else {
            ice_servers
        };
        let rtc_config = RTCConfiguration {
            ice_servers: to_rtc_ice_servers(&ice_servers),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        let state_tx = events.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();

                Box::pin(async move {
                    info!("Peer connection #{} state changed: {:?}", generation, s);
                    let _ = tx.send(TransportEvent::StatusChanged {
                        generation,
                        status: ConnectionStatus::from(s),
                    });
                })
            },
        ));

        // trickle ICE
        let ice_tx = events;
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(json_candidate) = candidate.to_json() else {
                    return;
                };
                let Ok(candidate) = serde_json::to_string(&json_candidate) else {
                    return;
                };
                let _ = tx.send(TransportEvent::CandidateGenerated {
                    generation,
                    candidate,
                });
            })
        }));

        debug!("Created peer connection #{}", generation);

        Ok(Self { peer_connection })
    }
}

#[async_trait]
impl PeerConnection for RtcPeerConnection {
    async fn add_track(&self, track: &LocalTrack) -> Result<()> {
        let rtp: Arc<dyn TrackLocal + Send + Sync> = track.rtp();
        self.peer_connection
            .add_track(rtp)
            .await
            .with_context(|| format!("Failed to attach track '{}'", track.id()))?;
        Ok(())
    }

    async fn create_offer(&self) -> Result<String> {
        let offer = self.peer_connection.create_offer(None).await?;
        Ok(offer.sdp)
    }

    async fn create_answer(&self) -> Result<String> {
        let answer = self.peer_connection.create_answer(None).await?;
        Ok(answer.sdp)
    }

    async fn set_local_description(&self, kind: SdpKind, sdp: String) -> Result<()> {
        self.peer_connection
            .set_local_description(to_description(kind, sdp)?)
            .await?;
        Ok(())
    }

    async fn set_remote_description(&self, kind: SdpKind, sdp: String) -> Result<()> {
        self.peer_connection
            .set_remote_description(to_description(kind, sdp)?)
            .await?;
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: String) -> Result<()> {
        let candidate: RTCIceCandidateInit =
            serde_json::from_str(&candidate).context("Failed to parse ICE candidate JSON")?;
        self.peer_connection.add_ice_candidate(candidate).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}
