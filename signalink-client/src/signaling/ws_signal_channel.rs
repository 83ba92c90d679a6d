use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use signalink_core::{ClientMessage, ServerMessage};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use crate::error::SignalChannelError;
use crate::signaling::SignalSink;

#[derive(Debug)]
enum Outbound {
    Signal(ClientMessage),
    Close(oneshot::Sender<()>),
}

#[derive(Debug, Clone)]
pub struct WsSignalSink {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl WsSignalSink {
    /// Closes the connection once every message queued before this call has
    /// been written.
    pub async fn close(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Outbound::Close(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }
}

#[async_trait]
impl SignalSink for WsSignalSink {
    async fn send(&self, msg: ClientMessage) {
        if let Err(e) = self.tx.send(Outbound::Signal(msg)) {
            warn!("Relay connection closed, dropping {:?}", e.0);
        }
    }
}

/// WebSocket connection to the relay, split into a sink and an inbound stream.
pub struct WsSignalChannel;

impl WsSignalChannel {
    /// Connects to `url` (e.g. `ws://127.0.0.1:3001/ws`).
    ///
    /// The returned receiver yields parsed relay frames and ends when the
    /// connection closes.
    pub async fn connect(
        url: &str,
    ) -> Result<(WsSignalSink, mpsc::UnboundedReceiver<ServerMessage>), SignalChannelError> {
        info!("Connecting to signaling relay: {}", url);

        let (ws_stream, _) =
            connect_async(url)
                .await
                .map_err(|source| SignalChannelError::Connect {
                    url: url.to_owned(),
                    source,
                })?;

        let (mut write, mut read) = ws_stream.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Outbound>();
        let (in_tx, in_rx) = mpsc::unbounded_channel::<ServerMessage>();

        tokio::spawn(async move {
            let mut on_closed = None;
            while let Some(outbound) = out_rx.recv().await {
                let msg = match outbound {
                    Outbound::Signal(msg) => msg,
                    Outbound::Close(done) => {
                        on_closed = Some(done);
                        break;
                    }
                };
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("Failed to serialize signal message: {}", e);
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(json)).await {
                    error!("Failed to send WebSocket message: {}", e);
                    break;
                }
            }
            let _ = write.close().await;
            if let Some(done) = on_closed {
                let _ = done.send(());
            }
            debug!("Signal sender task terminated");
        });

        tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(msg) => {
                            if in_tx.send(msg).is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid ServerMessage from relay: {}", e),
                    },
                    Ok(Message::Close(_)) => {
                        info!("Relay closed the connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                }
            }
            debug!("Signal receiver task terminated");
        });

        Ok((WsSignalSink { tx: out_tx }, in_rx))
    }
}
