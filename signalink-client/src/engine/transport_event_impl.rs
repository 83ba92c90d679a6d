use signalink_core::ClientMessage;
use tracing::{debug, info};

use crate::NegotiationClient;
use crate::engine::NegotiationState;
use crate::transport::{ConnectionStatus, TransportEvent};

impl NegotiationClient {
    pub async fn handle_transport_event(&mut self, event: TransportEvent) {
        let Some(peer) = self
            .active
            .as_ref()
            .filter(|a| a.generation == event.generation())
            .map(|a| a.peer)
        else {
            debug!("Ignoring stale transport event: {:?}", event);
            return;
        };

        match event {
            TransportEvent::CandidateGenerated { candidate, .. } => {
                self.signaling
                    .send(ClientMessage::IceCandidate { candidate })
                    .await;
            }

            TransportEvent::StatusChanged {
                status: ConnectionStatus::Connected,
                ..
            } => {
                if matches!(self.state(), NegotiationState::Negotiating { .. }) {
                    self.set_state(NegotiationState::Connected { peer });
                }
            }

            TransportEvent::StatusChanged { status, .. } if status.is_terminal() => {
                info!("Connection to {} {:?}", peer, status);
                self.close_connection().await;
            }

            TransportEvent::StatusChanged { status, .. } => {
                debug!("Connection to {} is {:?}", peer, status);
            }
        }
    }
}
