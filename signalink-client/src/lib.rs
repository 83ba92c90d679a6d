mod engine;
mod error;
mod media;
mod signaling;
mod transport;

pub use engine::{LocalIntent, NegotiationClient, NegotiationState, Role};
pub use error::{NegotiationError, SignalChannelError};
pub use media::{LocalStream, LocalTrack, MediaSource, SyntheticMediaSource, TrackKind};
pub use signaling::{SignalSink, WsSignalChannel, WsSignalSink};
pub use transport::{
    ConnectionContext, ConnectionStatus, PeerConnection, PeerConnectionFactory,
    RtcConnectionFactory, RtcPeerConnection, TransportEvent,
};
