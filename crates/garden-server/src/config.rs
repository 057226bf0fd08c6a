//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use garden_shared::constants::{DEFAULT_HTTP_PORT, DEFAULT_PLANTS_FILE};

/// Where the plant document lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// JSON file at [`ServerConfig::plants_file`].
    #[default]
    File,
    /// Process memory, seeded on startup and lost on exit.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(StoreBackend::File),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`, or `PORT` to change only the port.
    /// Default: `0.0.0.0:5000`
    pub http_addr: SocketAddr,

    /// Path of the JSON plant document.
    /// Env: `PLANTS_FILE`
    /// Default: `./data/plants.json`
    pub plants_file: PathBuf,

    /// Env: `STORE_BACKEND` (`file` / `memory`)
    /// Default: `file`
    pub store_backend: StoreBackend,

    /// Largest accepted request body in bytes.
    /// Env: `MAX_BODY_BYTES`
    /// Default: 1 MiB
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            plants_file: PathBuf::from(DEFAULT_PLANTS_FILE),
            store_backend: StoreBackend::File,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a caller-supplied variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => config.http_addr.set_port(port),
                Err(_) => tracing::warn!(value = %port, "Invalid PORT, ignoring"),
            }
        }

        if let Some(path) = lookup("PLANTS_FILE") {
            if !path.trim().is_empty() {
                config.plants_file = PathBuf::from(path);
            }
        }

        if let Some(backend) = lookup("STORE_BACKEND") {
            match backend.parse() {
                Ok(parsed) => config.store_backend = parsed,
                Err(e) => tracing::warn!(error = %e, "Invalid STORE_BACKEND, using default"),
            }
        }

        if let Some(val) = lookup("MAX_BODY_BYTES") {
            match val.trim().parse::<usize>() {
                Ok(n) => config.max_body_bytes = n,
                Err(_) => tracing::warn!(value = %val, "Invalid MAX_BODY_BYTES, using default"),
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}
