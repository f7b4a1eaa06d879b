//! Eventify Development Backend
//!
//! Run with: cargo run --bin eventify-api
//!
//! # Configuration
//!
//! Reads the `[server]` and `[logging]` sections of the config file.
//! Environment variables:
//! - `EVENTIFY_SERVER_HOST`: Host to bind to (default: 127.0.0.1)
//! - `EVENTIFY_SERVER_PORT`: Port to listen on (default: 5000)
//! - `EVENTIFY_DB_PATH`: JSON database file
//! - `RUST_LOG`: Log filter, overriding the configured level

use anyhow::Context;
use eventify::api::{serve, AppState};
use eventify::config::Config;
use eventify::logging::init_logging;
use eventify::repository::EventRepository;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load_from(config_path.as_deref())
        .with_context(|| "Failed to load configuration")?;

    init_logging(&config.logging)?;

    tracing::info!("Starting Eventify backend v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", config.server.db_path);

    let repository = EventRepository::open(&config.server.db_path)
        .await
        .with_context(|| format!("Failed to open {}", config.server.db_path))?;
    tracing::info!("Loaded {} events", repository.len().await);

    let state = AppState::new(Arc::new(repository), config.server.clone());
    serve(state).await?;

    tracing::info!("Eventify backend stopped");
    Ok(())
}
