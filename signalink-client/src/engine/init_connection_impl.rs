use signalink_core::{ClientMessage, ParticipantId, SdpKind};
use tracing::info;

use crate::NegotiationClient;
use crate::engine::{NegotiationState, Role};
use crate::error::NegotiationError;

impl NegotiationClient {
    /// `other-user`: we joined second, so we make the offer.
    pub(super) async fn init_connection(&mut self, peer: ParticipantId) {
        info!("Peer {} already in room. Initiating connection...", peer);

        match self.send_offer(peer).await {
            Ok(()) => self.set_state(NegotiationState::Negotiating {
                role: Role::Initiator,
                peer,
            }),
            Err(e) => self.fail_negotiation(e).await,
        }
    }

    async fn send_offer(&mut self, peer: ParticipantId) -> Result<(), NegotiationError> {
        self.replace_connection(peer).await?;
        let Some(active) = &self.active else {
            return Ok(());
        };

        let sdp = active
            .pc
            .create_offer()
            .await
            .map_err(|source| NegotiationError::Negotiation {
                step: "creating offer",
                source,
            })?;
        active
            .pc
            .set_local_description(SdpKind::Offer, sdp.clone())
            .await
            .map_err(|source| NegotiationError::Negotiation {
                step: "applying local offer",
                source,
            })?;

        self.signaling.send(ClientMessage::Offer { sdp }).await;
        info!("Offer sent to {}", peer);
        Ok(())
    }
}
