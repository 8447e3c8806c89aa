//! # Movies — CRUD over the in-memory collection
//!
//! ## Endpoints
//!
//! - `GET /movies`: list movies, optionally `?genre=<name>` (case-insensitive)
//! - `GET /movies/{id}`: get movie
//! - `POST /movies`: create movie (full validation)
//! - `PATCH /movies/{id}`: merge fields into a movie (partial validation)
//! - `DELETE /movies/{id}`: delete movie
//!
//! Request bodies are validated before the store is touched, so a rejected
//! submission never mutates the collection.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use movies_core::{validate_movie, validate_partial_movie, Movie};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use super::MessageResponse;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_query};
use crate::state::AppState;

// ── Request DTOs ────────────────────────────────────────────────────

/// Query parameters for listing movies.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMoviesQuery {
    /// Only return movies carrying this genre (case-insensitive).
    pub genre: Option<String>,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the movies router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/{id}",
            get(get_movie).patch(update_movie).delete(delete_movie),
        )
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("movie {id}"))
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET /movies: List movies.
#[utoipa::path(
    get,
    path = "/movies",
    params(ListMoviesQuery),
    responses(
        (status = 200, description = "Movies in insertion order", body = Vec<Movie>),
        (status = 400, description = "Malformed query string", body = crate::error::ErrorBody),
    ),
    tag = "movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    query: Result<Query<ListMoviesQuery>, QueryRejection>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let query = extract_query(query)?;
    Ok(Json(state.store.list(query.genre.as_deref())))
}

/// GET /movies/{id}: Get a single movie.
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie found", body = Movie),
        (status = 404, description = "Movie not found", body = crate::error::ErrorBody),
    ),
    tag = "movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, AppError> {
    state.store.get(&id).map(Json).ok_or_else(|| not_found(&id))
}

/// POST /movies: Create a movie.
#[utoipa::path(
    post,
    path = "/movies",
    request_body = movies_core::MovieInput,
    responses(
        (status = 201, description = "Movie created", body = Movie),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>), AppError> {
    let body = extract_json(body)?;
    let input = validate_movie(&body)?;
    let movie = state.store.create(input);
    tracing::info!(id = %movie.id, title = movie.title().unwrap_or_default(), "movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// PATCH /movies/{id}: Merge fields into a movie.
#[utoipa::path(
    patch,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie ID")),
    request_body = movies_core::MoviePatch,
    responses(
        (status = 200, description = "Movie updated", body = Movie),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 404, description = "Movie not found", body = crate::error::ErrorBody),
    ),
    tag = "movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Movie>, AppError> {
    let body = extract_json(body)?;
    let patch = validate_partial_movie(&body)?;
    let movie = state.store.update(&id, patch).ok_or_else(|| not_found(&id))?;
    tracing::info!(id = %movie.id, "movie updated");
    Ok(Json(movie))
}

/// DELETE /movies/{id}: Delete a movie.
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie deleted", body = MessageResponse),
        (status = 404, description = "Movie not found", body = crate::error::ErrorBody),
    ),
    tag = "movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let movie = state.store.delete(&id).ok_or_else(|| not_found(&id))?;
    tracing::info!(id = %movie.id, title = movie.title().unwrap_or_default(), "movie deleted");
    Ok(Json(MessageResponse::new("Movie deleted")))
}
