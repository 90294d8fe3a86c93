//! Stick Arena Server
//!
//! Runs the WebSocket arena and a settlement consumer that logs every
//! finished match. Configuration comes from the environment; see
//! [`ServerConfig::from_env`] and [`stick_arena::network::auth::AuthConfig::from_env`].

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stick_arena::network::server::{ArenaServer, ServerConfig};
use stick_arena::VERSION;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env();

    info!("Stick Arena Server v{}", VERSION);
    info!("bind address: {}", config.bind_addr);
    info!("forfeit timeout: {:?}", config.forfeit_timeout);
    if !config.auth.is_configured() {
        warn!("no auth key configured, all connections will fail authentication");
    }

    let (server, mut outcomes) = ArenaServer::new(config);

    // Settlement consumer: a persistence layer would hang off this
    // channel; for now every outcome is logged.
    tokio::spawn(async move {
        while let Some(outcome) = outcomes.recv().await {
            info!(
                session = %hex::encode(&outcome.session_id[..4]),
                kind = ?outcome.kind,
                winner = %outcome
                    .winner
                    .map(|w| hex::encode(w.as_bytes()))
                    .unwrap_or_else(|| "none".into()),
                "match settled"
            );
        }
    });

    server.run().await.context("arena server exited")?;
    Ok(())
}
