//! # Cross-Origin Policy
//!
//! Requests without an `Origin` header (same-origin browsers, curl, server
//! to server) and requests from an allow-listed origin are served. Any other
//! origin is rejected with 403 before routing, including CORS preflights.
//!
//! Allowed origins additionally receive CORS response headers from
//! [`OriginPolicy::cors_layer`].

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::AppError;

/// Origin allow-list shared with the middleware through request extensions.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Arc<HashSet<String>>,
}

impl OriginPolicy {
    /// Create a policy permitting exactly `origins`.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Arc::new(origins.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether a request carrying `origin` may proceed.
    pub fn permits(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(o) => self.allowed.contains(o),
        }
    }

    /// CORS headers for allow-listed origins.
    ///
    /// The allow-list is matched literally, so a `*` entry never acts as a wildcard.
    pub fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .allowed
            .iter()
            .filter(|o| o.as_str() != "*")
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "ignoring allowed origin that is not a valid header value");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Middleware that rejects requests from origins outside the allow-list.
///
/// When no [`OriginPolicy`] extension is installed every request passes.
pub async fn origin_middleware(request: Request, next: Next) -> Response {
    let policy = request.extensions().get::<OriginPolicy>().cloned();

    if let Some(policy) = policy {
        if let Some(value) = request.headers().get(header::ORIGIN) {
            let origin = value.to_str().ok();
            if origin.is_none() || !policy.permits(origin) {
                let shown = String::from_utf8_lossy(value.as_bytes()).into_owned();
                tracing::warn!(origin = %shown, method = %request.method(), uri = %request.uri(), "request from disallowed origin rejected");
                return AppError::Forbidden(format!("origin {shown} is not allowed")).into_response();
            }
        }
    }

    next.run(request).await
}
