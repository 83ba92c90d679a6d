mod participant;
mod room;
mod sdp;
mod signaling;

pub use participant::{ParticipantId, ParticipantIdError};
pub use room::RoomId;
pub use sdp::SdpKind;
pub use signaling::{ClientMessage, IceServerConfig, ServerMessage};
