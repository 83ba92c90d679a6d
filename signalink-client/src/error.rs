use signalink_core::RoomId;
use thiserror::Error;

/// Failures the negotiation client reports upward.
///
/// Only `PermissionDenied` and `RoomFull` stop a call from starting; the rest
/// are recovered locally by resetting to idle.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("media device access denied: {0}")]
    PermissionDenied(String),

    #[error("room '{0}' is full")]
    RoomFull(RoomId),

    #[error("failed to create peer connection")]
    Connection {
        #[source]
        source: anyhow::Error,
    },

    #[error("negotiation failed while {step}")]
    Negotiation {
        step: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Error)]
pub enum SignalChannelError {
    #[error("failed to connect to relay at {url}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
}
