use signalink_core::ParticipantId;
use tracing::{debug, error, warn};

use crate::NegotiationClient;
use crate::engine::{ActiveConnection, NegotiationState};
use crate::error::NegotiationError;
use crate::transport::ConnectionContext;

impl NegotiationClient {
    /// Closes whatever connection is live, then installs a fresh one for
    /// `peer` with the local tracks attached. Returns its generation.
    pub(super) async fn replace_connection(
        &mut self,
        peer: ParticipantId,
    ) -> Result<u64, NegotiationError> {
        self.release_connection().await;

        self.generation += 1;
        let generation = self.generation;

        let ctx = ConnectionContext {
            generation,
            ice_servers: self.ice_servers.clone(),
            events: self.transport_tx.clone(),
        };
        let pc = self
            .factory
            .create(ctx)
            .await
            .map_err(|source| NegotiationError::Connection { source })?;

        debug!("Peer connection #{} created for {}", generation, peer);
        self.active = Some(ActiveConnection {
            generation,
            peer,
            pc,
        });

        self.attach_local_tracks().await?;
        Ok(generation)
    }

    async fn attach_local_tracks(&self) -> Result<(), NegotiationError> {
        let (Some(active), Some(stream)) = (&self.active, &self.local_stream) else {
            return Ok(());
        };

        for track in stream.live_tracks() {
            active
                .pc
                .add_track(track)
                .await
                .map_err(|source| NegotiationError::Negotiation {
                    step: "attaching local tracks",
                    source,
                })?;
        }
        Ok(())
    }

    /// Empties the connection slot without touching the published state.
    pub(super) async fn release_connection(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        if let Err(e) = active.pc.close().await {
            warn!("Error closing peer connection #{}: {}", active.generation, e);
        }
        debug!("Peer connection #{} released", active.generation);
    }

    pub(super) async fn close_connection(&mut self) {
        self.release_connection().await;
        self.set_state(NegotiationState::Idle);
    }

    /// Tears the attempt down and records why.
    pub(super) async fn fail_negotiation(&mut self, error: NegotiationError) {
        error!("Negotiation failed: {:?}", error);
        self.close_connection().await;
        self.last_failure = Some(error);
    }
}
