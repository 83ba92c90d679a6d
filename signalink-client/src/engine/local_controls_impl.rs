use signalink_core::{ClientMessage, RoomId};
use tracing::{debug, info};

use crate::NegotiationClient;
use crate::error::NegotiationError;
use crate::media::TrackKind;

impl NegotiationClient {
    /// Acquires local media and asks the relay to join `room`.
    ///
    /// On `PermissionDenied` nothing changes: no room, no connection, no
    /// message sent.
    pub async fn join(&mut self, room: RoomId) -> Result<(), NegotiationError> {
        let stream = self.media.acquire().await?;

        if self.room.is_some() {
            self.close_connection().await;
        }
        if let Some(previous) = self.local_stream.replace(stream) {
            previous.stop_all();
        }

        info!("Joining room '{}'", room);
        self.room = Some(room.clone());
        self.last_failure = None;
        self.signaling
            .send(ClientMessage::JoinRoom { room_id: room })
            .await;
        Ok(())
    }

    /// Ends the call and leaves the room.
    pub async fn hangup(&mut self) {
        self.close_connection().await;

        if let Some(stream) = self.local_stream.take() {
            stream.stop_all();
        }
        if let Some(room) = self.room.take() {
            info!("Leaving room '{}'", room);
            self.signaling.send(ClientMessage::Leave).await;
        }
    }

    /// Mutes or unmutes local audio without renegotiating. Muted tracks stay
    /// attached; [`LocalTrack::write_sample`](crate::LocalTrack::write_sample)
    /// drops their samples.
    pub fn set_microphone_enabled(&self, enabled: bool) {
        self.set_tracks_enabled(TrackKind::Audio, enabled);
    }

    /// Video counterpart of [`Self::set_microphone_enabled`].
    pub fn set_camera_enabled(&self, enabled: bool) {
        self.set_tracks_enabled(TrackKind::Video, enabled);
    }

    fn set_tracks_enabled(&self, kind: TrackKind, enabled: bool) {
        let Some(stream) = &self.local_stream else {
            debug!("No local media to toggle");
            return;
        };
        stream.set_enabled(kind, enabled);
        info!(
            "{:?} {}",
            kind,
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Local teardown once the relay is gone; nothing left to tell it.
    pub(super) async fn shutdown(&mut self) {
        self.close_connection().await;
        if let Some(stream) = self.local_stream.take() {
            stream.stop_all();
        }
        self.room = None;
    }
}
