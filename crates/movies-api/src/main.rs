//! # movies-api — Binary Entry Point
//!
//! Loads the seed file into the record store and starts the Axum HTTP
//! server. Binds to configurable port (default 3000).

use movies_api::state::{AppConfig, AppState};
use movies_core::MovieStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::debug!(?config, "configuration loaded");

    let store = MovieStore::load(&config.seed_path).map_err(|e| {
        tracing::error!("Seed loading failed: {e}");
        e
    })?;
    tracing::info!(
        count = store.len(),
        path = %config.seed_path.display(),
        "record store seeded"
    );

    let port = config.port;
    let app = movies_api::app(AppState::with_config(config, store));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Movies API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
