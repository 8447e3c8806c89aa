//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies API",
        version = "0.1.0",
        description = "CRUD over an in-memory movie catalogue with schema validation and genre filtering.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::root::greeting,
        crate::routes::movies::list_movies,
        crate::routes::movies::get_movie,
        crate::routes::movies::create_movie,
        crate::routes::movies::update_movie,
        crate::routes::movies::delete_movie,
    ),
    components(schemas(
        movies_core::Movie,
        movies_core::MovieInput,
        movies_core::MoviePatch,
        movies_core::Genre,
        movies_core::FieldError,
        crate::routes::MessageResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "root", description = "Service greeting"),
        (name = "movies", description = "Movie catalogue"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
