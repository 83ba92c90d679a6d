use signalink_core::{ClientMessage, ParticipantId, SdpKind};
use tracing::{debug, info};

use crate::NegotiationClient;
use crate::engine::{NegotiationState, Role};
use crate::error::NegotiationError;

impl NegotiationClient {
    /// Answers an offer, superseding any connection we already hold.
    pub(super) async fn handle_remote_offer(&mut self, sdp: String, from: ParticipantId) {
        info!("Received offer from {}", from);

        match self.send_answer(sdp, from).await {
            Ok(()) => self.set_state(NegotiationState::Negotiating {
                role: Role::Responder,
                peer: from,
            }),
            Err(e) => self.fail_negotiation(e).await,
        }
    }

    async fn send_answer(
        &mut self,
        offer: String,
        from: ParticipantId,
    ) -> Result<(), NegotiationError> {
        self.replace_connection(from).await?;
        let Some(active) = &self.active else {
            return Ok(());
        };

        active
            .pc
            .set_remote_description(SdpKind::Offer, offer)
            .await
            .map_err(|source| NegotiationError::Negotiation {
                step: "applying remote offer",
                source,
            })?;
        let sdp = active
            .pc
            .create_answer()
            .await
            .map_err(|source| NegotiationError::Negotiation {
                step: "creating answer",
                source,
            })?;
        active
            .pc
            .set_local_description(SdpKind::Answer, sdp.clone())
            .await
            .map_err(|source| NegotiationError::Negotiation {
                step: "applying local answer",
                source,
            })?;

        self.signaling.send(ClientMessage::Answer { sdp }).await;
        info!("Answer sent to {}", from);
        Ok(())
    }

    /// Completes our own offer. Answers we are not waiting for are dropped.
    pub(super) async fn handle_remote_answer(&mut self, sdp: String, from: ParticipantId) {
        let awaiting = self.state()
            == NegotiationState::Negotiating {
                role: Role::Initiator,
                peer: from,
            };
        let Some(active) = self.active.as_ref().filter(|_| awaiting) else {
            debug!("Ignoring answer from {} in state {}", from, self.state());
            return;
        };

        let result = active
            .pc
            .set_remote_description(SdpKind::Answer, sdp)
            .await
            .map_err(|source| NegotiationError::Negotiation {
                step: "applying remote answer",
                source,
            });

        match result {
            Ok(()) => info!("Remote description set (answer from {})", from),
            Err(e) => self.fail_negotiation(e).await,
        }
    }
}
