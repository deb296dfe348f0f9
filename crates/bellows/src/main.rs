//! Drive a browser wallet session from the terminal.
//!
//! Starts a local bridge server, opens the wallet page, and keeps the page's
//! connection, network, and balance panels in sync with the injected wallet.

use std::{sync::Arc, time::Duration};

use bellows_wallet::{
    SessionOrchestrator, WalletProvider,
    bridge::{BridgeServer, UserAction},
};
use clap::Parser;
use eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bellows", version, about = "Browser wallet session dashboard")]
struct Args {
    /// Port for the local bridge server (0 picks an ephemeral port).
    #[arg(long, default_value_t = 0)]
    port: u16,

    /// Do not open the wallet page in a browser automatically.
    #[arg(long)]
    no_browser: bool,

    /// Seconds to wait for the page handshake and for each provider call.
    #[arg(long, default_value_t = 120)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    run(Args::parse()).await
}

async fn run(args: Args) -> Result<()> {
    let mut server =
        BridgeServer::new(args.port, !args.no_browser, Duration::from_secs(args.timeout));
    server.start().await?;
    info!(target: "bellows", url = %server.url(), "wallet page served");

    server.wait_until_ready().await?;

    let provider = Arc::new(server.provider());
    let mut orchestrator = SessionOrchestrator::new(provider.clone(), server.view());

    if !orchestrator.initialize() {
        info!(target: "bellows", "no wallet provider detected; page left in the unavailable state");
        tokio::signal::ctrl_c().await?;
        server.stop().await?;
        return Ok(());
    }

    let mut events =
        provider.take_events().ok_or_else(|| eyre!("wallet event stream already taken"))?;
    let mut actions =
        server.take_actions().ok_or_else(|| eyre!("user action stream already taken"))?;

    loop {
        tokio::select! {
            Some(UserAction::Toggle) = actions.recv() => orchestrator.toggle_connection().await,
            Some(event) = events.recv() => orchestrator.handle_event(event).await,
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!(target: "bellows", "shutting down");
    server.stop().await?;
    Ok(())
}
