use async_trait::async_trait;
use signalink_core::ClientMessage;

/// Outbound half of the relay connection.
///
/// Sending is best-effort: a closed connection drops the message, and the
/// negotiation protocol recovers through the disconnect path instead.
#[async_trait]
pub trait SignalSink: Send + Sync {
    async fn send(&self, msg: ClientMessage);
}
