//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor, and the startup configuration it is built from.

use std::collections::BTreeSet;
use std::path::PathBuf;

use movies_core::MovieStore;

/// Port used when `PORT` is unset or unparsable.
pub const DEFAULT_PORT: u16 = 3000;

/// Seed file used when `MOVIES_SEED_PATH` is unset.
pub const DEFAULT_SEED_PATH: &str = "resources/movies.json";

/// Origins permitted when `ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://127.0.0.1:5500", "http://localhost:8080"];

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Origins allowed to call the API. Requests without an `Origin` header
    /// are always allowed.
    pub allowed_origins: BTreeSet<String>,
    /// JSON file the record store is seeded from.
    pub seed_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            seed_path: PathBuf::from(DEFAULT_SEED_PATH),
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// - `PORT`: listen port (default 3000)
    /// - `MOVIES_SEED_PATH`: seed file (default `resources/movies.json`)
    /// - `ALLOWED_ORIGINS`: comma-separated origin allow-list
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("PORT") {
            match raw.trim().parse() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!(
                    value = %raw,
                    default = DEFAULT_PORT,
                    "PORT is not a valid port number, using default"
                ),
            }
        }

        if let Some(path) = lookup("MOVIES_SEED_PATH").filter(|p| !p.trim().is_empty()) {
            config.seed_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("ALLOWED_ORIGINS") {
            let origins: BTreeSet<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            if origins.is_empty() {
                tracing::warn!("ALLOWED_ORIGINS is empty, using default allow-list");
            } else {
                config.allowed_origins = origins;
            }
        }

        config
    }
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The movie collection.
    pub store: MovieStore,
    /// Startup configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create a state around `store` with default configuration.
    pub fn new(store: MovieStore) -> Self {
        Self::with_config(AppConfig::default(), store)
    }

    /// Create a state around `store` with the given configuration.
    pub fn with_config(config: AppConfig, store: MovieStore) -> Self {
        Self { store, config }
    }
}
