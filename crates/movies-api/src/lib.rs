//! # movies-api — Axum HTTP Service for the Movie Catalogue
//!
//! Exposes the [`movies_core::MovieStore`] over HTTP. Request bodies are
//! validated with [`movies_core::validate_movie`] /
//! [`movies_core::validate_partial_movie`] before the store is touched.
//!
//! ## API Surface
//!
//! | Route                  | Module                  |
//! |------------------------|-------------------------|
//! | `GET /`                | [`routes::root`]        |
//! | `GET/POST /movies`     | [`routes::movies`]      |
//! | `GET/PATCH/DELETE /movies/{id}` | [`routes::movies`] |
//! | `GET /openapi.json`    | [`openapi`]             |
//! | `GET /health/*`        | this module             |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → OriginMiddleware → CorsLayer → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::{AppConfig, AppState};

use axum::middleware::from_fn;
use axum::{Extension, Router};

use crate::middleware::origin::OriginPolicy;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the origin policy so
/// orchestrators can reach them from anywhere.
pub fn app(state: AppState) -> Router {
    let policy = OriginPolicy::new(state.config.allowed_origins.iter().cloned());

    let api = Router::new()
        .merge(routes::root::router())
        .merge(routes::movies::router())
        .merge(openapi::router())
        .layer(policy.cors_layer())
        .layer(from_fn(middleware::origin::origin_middleware))
        .layer(Extension(policy))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(middleware::tracing_layer::layer())
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the store is loaded before the listener binds, so a
/// serving process is always ready.
async fn readiness() -> &'static str {
    "ready"
}
