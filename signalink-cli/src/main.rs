use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use signalink_server::RelayConfig;
use tracing_subscriber::EnvFilter;

mod call;

use call::CallConfig;

#[derive(Parser)]
#[command(name = "signalink")]
#[command(about = "Two-party WebRTC signaling relay and headless participant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling relay
    Relay(RelayConfig),
    /// Join a room as a headless participant with synthetic media
    Call(CallConfig),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Relay(config) => {
            println!(
                "{} {}",
                "🚀 Starting signaling relay on".green().bold(),
                config.socket_addr()
            );
            signalink_server::serve(config).await?;
        }
        Commands::Call(config) => call::run(config).await?,
    }

    Ok(())
}
