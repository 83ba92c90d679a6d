use crate::room::{Departure, RoomRegistry};
use crate::signaling::Session;
use dashmap::DashMap;
use signalink_core::{ClientMessage, IceServerConfig, ParticipantId, RoomId, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

struct SignalingInner {
    peers: DashMap<ParticipantId, mpsc::UnboundedSender<ServerMessage>>,
    registry: Arc<RoomRegistry>,
    ice_servers: Vec<IceServerConfig>,
}

/// The relay. Cheap to clone; every connection handler holds one.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(registry: Arc<RoomRegistry>, ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
                registry,
                ice_servers,
            }),
        }
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.inner.registry
    }

    pub fn get_ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    pub fn connection_count(&self) -> usize {
        self.inner.peers.len()
    }

    /// Registers a new connection and queues its `welcome` frame.
    pub fn connect(&self) -> (Session, mpsc::UnboundedReceiver<ServerMessage>) {
        let participant_id = ParticipantId::new();
        let (tx, rx) = mpsc::unbounded_channel();

        self.inner.peers.insert(participant_id, tx);
        self.send_signal(
            &participant_id,
            ServerMessage::Welcome {
                participant_id,
                ice_servers: self.get_ice_servers(),
            },
        );

        info!("Participant {} connected", participant_id);
        (Session::new(participant_id), rx)
    }

    /// Processes one inbound frame for `session`.
    pub fn handle(&self, session: &mut Session, msg: ClientMessage) {
        match msg {
            ClientMessage::JoinRoom { room_id } => self.on_join(session, room_id),

            ClientMessage::Offer { sdp } => {
                let sender_id = session.participant_id();
                self.relay_to_room(session, ServerMessage::Offer { sdp, sender_id });
            }

            ClientMessage::Answer { sdp } => {
                let sender_id = session.participant_id();
                self.relay_to_room(session, ServerMessage::Answer { sdp, sender_id });
            }

            ClientMessage::IceCandidate { candidate } => {
                let sender_id = session.participant_id();
                self.relay_to_room(
                    session,
                    ServerMessage::IceCandidate {
                        candidate,
                        sender_id,
                    },
                );
            }

            ClientMessage::Leave => self.leave_current_room(session),
        }
    }

    /// Tears down everything tied to a closed connection.
    pub fn disconnect(&self, participant_id: ParticipantId) {
        self.inner.peers.remove(&participant_id);

        for departure in self.inner.registry.leave(&participant_id) {
            self.notify_departure(participant_id, &departure);
        }

        info!("Participant {} disconnected", participant_id);
    }

    /// Fire-and-forget delivery to one participant.
    pub fn send_signal(&self, peer_id: &ParticipantId, msg: ServerMessage) {
        let Some(peer) = self.inner.peers.get(peer_id) else {
            debug!(
                "Dropping '{}' for disconnected participant {}",
                msg.event_name(),
                peer_id
            );
            return;
        };

        if let Err(e) = peer.send(msg) {
            warn!(
                "Failed to queue '{}' for participant {}: connection closing",
                e.0.event_name(),
                peer_id
            );
        }
    }

    fn broadcast(&self, recipients: &[ParticipantId], msg: &ServerMessage) {
        for peer_id in recipients {
            self.send_signal(peer_id, msg.clone());
        }
    }

    fn on_join(&self, session: &mut Session, room_id: RoomId) {
        let participant_id = session.participant_id();

        if session.room().is_some_and(|current| *current != room_id) {
            self.leave_current_room(session);
        }

        match self.inner.registry.join(&room_id, participant_id) {
            Ok(outcome) => {
                if outcome.created {
                    info!("Room '{}' created", room_id);
                }
                if outcome.already_member {
                    info!("Participant {} rejoined room '{}'", participant_id, room_id);
                } else {
                    info!(
                        "Participant {} joined room '{}' ({} others)",
                        participant_id,
                        room_id,
                        outcome.others.len()
                    );
                }
                session.set_room(Some(room_id));

                self.broadcast(
                    &outcome.others,
                    &ServerMessage::UserConnected { participant_id },
                );

                if let Some(first) = outcome.others.first() {
                    self.send_signal(
                        &participant_id,
                        ServerMessage::OtherUser {
                            participant_id: *first,
                        },
                    );
                }
            }
            Err(e) => {
                warn!("Rejected join from {}: {}", participant_id, e);
                self.send_signal(&participant_id, ServerMessage::RoomFull { room_id });
            }
        }
    }

    fn leave_current_room(&self, session: &mut Session) {
        let participant_id = session.participant_id();
        let Some(room) = session.room().cloned() else {
            debug!("Participant {} left without a room", participant_id);
            return;
        };

        session.set_room(None);
        if let Some(departure) = self.inner.registry.leave_room(&room, &participant_id) {
            info!("Participant {} left room '{}'", participant_id, room);
            self.notify_departure(participant_id, &departure);
        }
    }

    fn notify_departure(&self, participant_id: ParticipantId, departure: &Departure) {
        self.broadcast(
            &departure.remaining,
            &ServerMessage::UserDisconnected { participant_id },
        );
    }

    fn relay_to_room(&self, session: &Session, msg: ServerMessage) {
        let Some(room) = session.room() else {
            debug!(
                "Ignoring '{}' from {}: not in a room",
                msg.event_name(),
                session.participant_id()
            );
            return;
        };

        let recipients = self
            .inner
            .registry
            .other_members(room, &session.participant_id());
        debug!(
            "Relaying '{}' from {} in room '{}' to {} peer(s)",
            msg.event_name(),
            session.participant_id(),
            room,
            recipients.len()
        );
        self.broadcast(&recipients, &msg);
    }
}
