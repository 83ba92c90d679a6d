use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use tokio::sync::mpsc;
use tracing::warn;

use signalink_client::{
    LocalIntent, NegotiationClient, NegotiationState, RtcConnectionFactory, SyntheticMediaSource,
    WsSignalChannel,
};
use signalink_core::RoomId;

const ROOM_ID_LEN: usize = 7;
const HANGUP_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Args)]
pub struct CallConfig {
    /// Relay WebSocket endpoint
    #[arg(long, env = "SIGNALINK_URL", default_value = "ws://127.0.0.1:3001/ws")]
    pub url: String,

    /// Room to join; a random one is generated when omitted
    #[arg(long)]
    pub room: Option<String>,

    /// Start with the microphone disabled
    #[arg(long)]
    pub mute: bool,

    /// Start with the camera disabled
    #[arg(long)]
    pub no_camera: bool,
}

pub fn random_room_id() -> RoomId {
    let id = uuid::Uuid::new_v4().simple().to_string();
    RoomId::new(&id[..ROOM_ID_LEN])
}

fn print_state(state: NegotiationState) {
    let line = match state {
        NegotiationState::Idle => "⏸  idle".yellow(),
        NegotiationState::Negotiating { .. } => format!("🤝 {}", state).as_str().cyan(),
        NegotiationState::Connected { .. } => format!("✨ {}", state).as_str().green().bold(),
    };
    println!("{}", line);
}

pub async fn run(config: CallConfig) -> Result<()> {
    let room = config.room.map(RoomId::from).unwrap_or_else(random_room_id);

    let (sink, inbound) = WsSignalChannel::connect(&config.url).await?;
    println!("{} {}", "📞 Joining room".cyan(), room.as_str().bold());

    let relay = sink.clone();
    let mut client = NegotiationClient::new(
        Arc::new(sink),
        Arc::new(RtcConnectionFactory),
        Arc::new(SyntheticMediaSource::default()),
    );
    let mut states = client.watch_state();

    let (intents, intent_rx) = mpsc::channel(8);
    intents
        .send(LocalIntent::Join(room))
        .await
        .context("negotiation loop stopped")?;
    if config.mute {
        intents.send(LocalIntent::SetMicrophone(false)).await?;
    }
    if config.no_camera {
        intents.send(LocalIntent::SetCamera(false)).await?;
    }

    let mut runner = tokio::spawn(async move {
        client.run(inbound, intent_rx).await;
        client
    });

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                print_state(*states.borrow_and_update());
            }

            _ = tokio::signal::ctrl_c() => {
                println!("{}", "👋 Hanging up".yellow());
                intents.send(LocalIntent::Hangup).await?;
                drop(intents);

                match tokio::time::timeout(HANGUP_GRACE, &mut runner).await {
                    Ok(result) => {
                        result.context("negotiation loop panicked")?;
                    }
                    Err(_) => warn!("Hangup did not complete in time"),
                }
                if tokio::time::timeout(HANGUP_GRACE, relay.close()).await.is_err() {
                    warn!("Relay connection did not close in time");
                }
                return Ok(());
            }

            result = &mut runner => {
                let client = result.context("negotiation loop panicked")?;
                println!("{}", "🔌 Relay closed the connection".red());
                if let Some(failure) = client.last_failure() {
                    println!("   {}", failure.to_string().as_str().red());
                }
                return Ok(());
            }
        }
    }

    Ok(())
}
