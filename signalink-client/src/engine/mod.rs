use signalink_core::{IceServerConfig, ParticipantId, RoomId, ServerMessage};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::error::NegotiationError;
use crate::media::{LocalStream, MediaSource};
use crate::signaling::SignalSink;
use crate::transport::{PeerConnection, PeerConnectionFactory, TransportEvent};

mod create_pc_impl;
mod handle_remote_offer_impl;
mod handle_signal_impl;
mod init_connection_impl;
mod local_controls_impl;
mod transport_event_impl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Joined second; sends the offer.
    Initiator,
    /// Already in the room; answers.
    Responder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegotiationState {
    #[default]
    Idle,
    Negotiating {
        role: Role,
        peer: ParticipantId,
    },
    Connected {
        peer: ParticipantId,
    },
}

impl fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegotiationState::Idle => write!(f, "idle"),
            NegotiationState::Negotiating { role, peer } => {
                write!(f, "negotiating with {} as {:?}", peer, role)
            }
            NegotiationState::Connected { peer } => write!(f, "connected to {}", peer),
        }
    }
}

/// Commands from the local user, fed into [`NegotiationClient::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalIntent {
    Join(RoomId),
    Hangup,
    SetMicrophone(bool),
    SetCamera(bool),
}

/// The one peer connection a client may hold at a time.
struct ActiveConnection {
    generation: u64,
    peer: ParticipantId,
    pc: Box<dyn PeerConnection>,
}

/// Drives one participant through offer/answer and ICE exchange.
///
/// All inputs (relay messages, local intents, transport events) are handled
/// one at a time on the task that owns the client. A newer trigger always
/// supersedes the connection created by an older one.
pub struct NegotiationClient {
    signaling: Arc<dyn SignalSink>,
    factory: Arc<dyn PeerConnectionFactory>,
    media: Arc<dyn MediaSource>,
    participant_id: Option<ParticipantId>,
    ice_servers: Vec<IceServerConfig>,
    room: Option<RoomId>,
    local_stream: Option<LocalStream>,
    active: Option<ActiveConnection>,
    generation: u64,
    state_tx: watch::Sender<NegotiationState>,
    transport_tx: mpsc::UnboundedSender<TransportEvent>,
    transport_rx: mpsc::UnboundedReceiver<TransportEvent>,
    last_failure: Option<NegotiationError>,
}

impl NegotiationClient {
    pub fn new(
        signaling: Arc<dyn SignalSink>,
        factory: Arc<dyn PeerConnectionFactory>,
        media: Arc<dyn MediaSource>,
    ) -> Self {
        let (state_tx, _) = watch::channel(NegotiationState::Idle);
        let (transport_tx, transport_rx) = mpsc::unbounded_channel();

        Self {
            signaling,
            factory,
            media,
            participant_id: None,
            ice_servers: Vec::new(),
            room: None,
            local_stream: None,
            active: None,
            generation: 0,
            state_tx,
            transport_tx,
            transport_rx,
            last_failure: None,
        }
    }

    pub fn state(&self) -> NegotiationState {
        *self.state_tx.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<NegotiationState> {
        self.state_tx.subscribe()
    }

    /// Our id as assigned by the relay's `welcome`.
    pub fn participant_id(&self) -> Option<ParticipantId> {
        self.participant_id
    }

    pub fn room(&self) -> Option<&RoomId> {
        self.room.as_ref()
    }

    pub fn ice_servers(&self) -> &[IceServerConfig] {
        &self.ice_servers
    }

    pub fn local_stream(&self) -> Option<&LocalStream> {
        self.local_stream.as_ref()
    }

    /// Generation of the live peer connection, if there is one.
    pub fn connection_generation(&self) -> Option<u64> {
        self.active.as_ref().map(|active| active.generation)
    }

    pub fn last_failure(&self) -> Option<&NegotiationError> {
        self.last_failure.as_ref()
    }

    /// Handles every transport event queued so far without waiting for more.
    pub async fn drain_transport_events(&mut self) {
        while let Ok(event) = self.transport_rx.try_recv() {
            self.handle_transport_event(event).await;
        }
    }

    /// Runs until the relay stream ends or every intent sender is dropped,
    /// then releases everything held locally.
    pub async fn run(
        &mut self,
        mut inbound: mpsc::UnboundedReceiver<ServerMessage>,
        mut intents: mpsc::Receiver<LocalIntent>,
    ) {
        loop {
            tokio::select! {
                msg = inbound.recv() => match msg {
                    Some(msg) => self.handle_signal(msg).await,
                    None => {
                        info!("Relay stream ended");
                        break;
                    }
                },

                Some(event) = self.transport_rx.recv() => {
                    self.handle_transport_event(event).await;
                }

                intent = intents.recv() => match intent {
                    Some(intent) => self.apply_intent(intent).await,
                    None => {
                        debug!("Local intent channel closed");
                        break;
                    }
                },
            }
        }

        self.shutdown().await;
    }

    pub async fn apply_intent(&mut self, intent: LocalIntent) {
        debug!("Local intent: {:?}", intent);

        match intent {
            LocalIntent::Join(room) => {
                if let Err(e) = self.join(room).await {
                    warn!("Join failed: {}", e);
                    self.last_failure = Some(e);
                }
            }
            LocalIntent::Hangup => self.hangup().await,
            LocalIntent::SetMicrophone(enabled) => self.set_microphone_enabled(enabled),
            LocalIntent::SetCamera(enabled) => self.set_camera_enabled(enabled),
        }
    }

    fn set_state(&self, state: NegotiationState) {
        let previous = self.state_tx.send_replace(state);
        if previous != state {
            info!("Negotiation state: {} -> {}", previous, state);
        }
    }
}
