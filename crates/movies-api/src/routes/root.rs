//! Greeting endpoint.

use axum::routing::get;
use axum::{Json, Router};

use super::MessageResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(greeting))
}

/// GET /: Static greeting.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = MessageResponse),
    ),
    tag = "root"
)]
pub async fn greeting() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello world"))
}
