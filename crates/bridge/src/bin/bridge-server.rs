//! Bridge service binary.
//!
//! Standalone HTTP service that receives Pingdom check notifications
//! and posts them to Mattermost channels.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bridge::{build_router, AppState, Config};
use mattermost::{Api, Client};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("bridge=info".parse()?))
        .init();

    info!("Starting Pingdom notification bridge...");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(hook_count = config.hooks.len(), "Configuration loaded");

    let client =
        Client::new(&config.mattermost_url, &config.mattermost_token).context("Failed to create Mattermost client")?;

    // Fail fast on a bad token and log the bot identity every message
    // will be sent as.
    let bot = client.me().await.context("Failed to fetch bot identity")?;
    info!(bot_user_id = %bot.id, username = %bot.username, "Connected to Mattermost");

    let api: Arc<dyn Api> = Arc::new(client);
    let state = Arc::new(AppState::new(config.hooks.clone(), api));

    // Establish channel bindings up front; failures are logged and
    // retried lazily on the first matching webhook.
    state.resolver.warm(&config.hooks).await;

    let app = build_router(Arc::clone(&state));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Pingdom bridge listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
