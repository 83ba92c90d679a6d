use signalink_core::ServerMessage;
use tracing::{debug, info, warn};

use crate::NegotiationClient;
use crate::error::NegotiationError;

impl NegotiationClient {
    pub async fn handle_signal(&mut self, msg: ServerMessage) {
        match msg {
            ServerMessage::Welcome {
                participant_id,
                ice_servers,
            } => {
                info!(
                    "Received Welcome as {} ({} ICE servers)",
                    participant_id,
                    ice_servers.len()
                );
                self.participant_id = Some(participant_id);
                self.ice_servers = ice_servers;
            }

            ServerMessage::OtherUser { participant_id } => {
                self.init_connection(participant_id).await;
            }

            ServerMessage::UserConnected { participant_id } => {
                info!("Peer {} joined the room", participant_id);
            }

            ServerMessage::Offer { sdp, sender_id } => {
                self.handle_remote_offer(sdp, sender_id).await;
            }

            ServerMessage::Answer { sdp, sender_id } => {
                self.handle_remote_answer(sdp, sender_id).await;
            }

            ServerMessage::IceCandidate {
                candidate,
                sender_id,
            } => {
                let Some(active) = self.active.as_ref().filter(|a| a.peer == sender_id) else {
                    debug!("Dropping ICE candidate from {}: no connection", sender_id);
                    return;
                };
                if let Err(e) = active.pc.add_ice_candidate(candidate).await {
                    warn!("Error adding ICE candidate from {}: {}", sender_id, e);
                }
            }

            ServerMessage::UserDisconnected { participant_id } => {
                if self.active.as_ref().is_some_and(|a| a.peer == participant_id) {
                    info!("Peer {} left. Closing connection", participant_id);
                    self.close_connection().await;
                } else {
                    debug!("Peer {} left", participant_id);
                }
            }

            ServerMessage::RoomFull { room_id } => {
                warn!("Room '{}' is full", room_id);
                self.close_connection().await;
                if let Some(stream) = self.local_stream.take() {
                    stream.stop_all();
                }
                self.room = None;
                self.last_failure = Some(NegotiationError::RoomFull(room_id));
            }
        }
    }
}
