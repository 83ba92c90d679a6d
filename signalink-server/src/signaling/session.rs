use signalink_core::{ParticipantId, RoomId};

/// Per-connection relay state, owned by that connection's handler.
#[derive(Debug)]
pub struct Session {
    participant_id: ParticipantId,
    room: Option<RoomId>,
}

impl Session {
    pub(crate) fn new(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            room: None,
        }
    }

    pub fn participant_id(&self) -> ParticipantId {
        self.participant_id
    }

    pub fn room(&self) -> Option<&RoomId> {
        self.room.as_ref()
    }

    pub(crate) fn set_room(&mut self, room: Option<RoomId>) {
        self.room = room;
    }
}
