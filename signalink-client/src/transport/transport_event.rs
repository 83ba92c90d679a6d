use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;

/// Link status as reported by the media transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl ConnectionStatus {
    /// Statuses after which the connection is unusable.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ConnectionStatus::Disconnected | ConnectionStatus::Failed | ConnectionStatus::Closed
        )
    }
}

impl From<RTCPeerConnectionState> for ConnectionStatus {
    fn from(state: RTCPeerConnectionState) -> Self {
        match state {
            RTCPeerConnectionState::Unspecified | RTCPeerConnectionState::New => Self::New,
            RTCPeerConnectionState::Connecting => Self::Connecting,
            RTCPeerConnectionState::Connected => Self::Connected,
            RTCPeerConnectionState::Disconnected => Self::Disconnected,
            RTCPeerConnectionState::Failed => Self::Failed,
            RTCPeerConnectionState::Closed => Self::Closed,
        }
    }
}

/// Events a peer connection emits back into the negotiation loop.
///
/// Every event carries the generation of the connection that produced it, so
/// events from a superseded connection can be told apart and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A local ICE candidate to trickle to the remote peer (opaque JSON).
    CandidateGenerated { generation: u64, candidate: String },

    StatusChanged {
        generation: u64,
        status: ConnectionStatus,
    },
}

impl TransportEvent {
    pub fn generation(&self) -> u64 {
        match self {
            TransportEvent::CandidateGenerated { generation, .. }
            | TransportEvent::StatusChanged { generation, .. } => *generation,
        }
    }
}
