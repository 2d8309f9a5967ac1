//! webforge - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the chat UI and agent API.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webforge::{api, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webforge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.default_model);

    api::serve(config).await?;

    Ok(())
}
