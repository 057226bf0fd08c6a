//! # garden-server
//!
//! REST API for the Garden Tracker.
//!
//! This binary provides:
//! - **Plant CRUD** under `/api/plants`, plus a watering action that only
//!   refreshes `lastWatered`
//! - **JSON document storage**: the whole collection is one pretty-printed
//!   file, seeded with two example plants on first start
//! - **Health check** at `/health`
//!
//! Cross-origin requests are accepted from any origin so the web UI can be
//! served from a different host.

mod api;
mod config;
mod error;
mod service;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use garden_shared::constants::APP_NAME;
use garden_store::{JsonFileStore, MemoryStore, PlantStore};

use crate::api::AppState;
use crate::config::{ServerConfig, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,garden_server=debug")),
        )
        .init();

    info!("Starting {} server v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Open the plant store
    // -----------------------------------------------------------------------
    let store: Arc<dyn PlantStore> = match config.store_backend {
        StoreBackend::File => Arc::new(JsonFileStore::open(config.plants_file.clone()).await?),
        StoreBackend::Memory => Arc::new(MemoryStore::seeded()),
    };
    info!(backend = store.backend(), "Plant store ready");

    let http_addr = config.http_addr;
    let app_state = AppState::new(store, config);

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
