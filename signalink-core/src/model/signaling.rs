use crate::model::participant::ParticipantId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// Frames sent by a participant to the relay.
///
/// `sdp` and `candidate` are opaque to the relay and forwarded untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    JoinRoom { room_id: RoomId },
    Offer { sdp: String },
    Answer { sdp: String },
    IceCandidate { candidate: String },
    Leave,
}

/// Frames sent by the relay to a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    /// First frame on every connection.
    Welcome {
        participant_id: ParticipantId,
        ice_servers: Vec<IceServerConfig>,
    },
    /// Sent only to the joiner: a peer was already waiting in the room.
    OtherUser { participant_id: ParticipantId },
    UserConnected { participant_id: ParticipantId },
    Offer { sdp: String, sender_id: ParticipantId },
    Answer { sdp: String, sender_id: ParticipantId },
    IceCandidate {
        candidate: String,
        sender_id: ParticipantId,
    },
    UserDisconnected { participant_id: ParticipantId },
    RoomFull { room_id: RoomId },
}

impl ServerMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            ServerMessage::Welcome { .. } => "welcome",
            ServerMessage::OtherUser { .. } => "other-user",
            ServerMessage::UserConnected { .. } => "user-connected",
            ServerMessage::Offer { .. } => "offer",
            ServerMessage::Answer { .. } => "answer",
            ServerMessage::IceCandidate { .. } => "ice-candidate",
            ServerMessage::UserDisconnected { .. } => "user-disconnected",
            ServerMessage::RoomFull { .. } => "room-full",
        }
    }
}
