use signalink_core::{ClientMessage, ParticipantId, RoomId, ServerMessage};
use signalink_server::{Session, SignalingService};
use tokio::sync::mpsc;

/// In-process participant: drives the relay directly, no sockets involved.
///
/// Relay delivery is synchronous into unbounded channels, so everything a
/// `send` causes is already queued when it returns.
pub struct TestClient {
    session: Session,
    rx: mpsc::UnboundedReceiver<ServerMessage>,
    service: SignalingService,
}

impl TestClient {
    /// Connects and consumes the `welcome` frame.
    pub fn connect(service: &SignalingService) -> Self {
        let (session, mut rx) = service.connect();

        match rx.try_recv() {
            Ok(ServerMessage::Welcome { participant_id, .. }) => {
                assert_eq!(participant_id, session.participant_id());
            }
            other => panic!("expected welcome, got {:?}", other),
        }

        Self {
            session,
            rx,
            service: service.clone(),
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.session.participant_id()
    }

    pub fn room(&self) -> Option<&RoomId> {
        self.session.room()
    }

    pub fn send(&mut self, msg: ClientMessage) {
        self.service.handle(&mut self.session, msg);
    }

    pub fn join(&mut self, room: &str) {
        self.send(ClientMessage::JoinRoom {
            room_id: RoomId::from(room),
        });
    }

    /// Everything received since the last call.
    pub fn drain(&mut self) -> Vec<ServerMessage> {
        let mut received = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            received.push(msg);
        }
        received
    }

    pub fn disconnect(self) {
        self.service.disconnect(self.session.participant_id());
    }
}
