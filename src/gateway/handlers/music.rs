//! Music catalog handlers
//!
//! Reads are public and return bare resources. Writes sit behind the bearer
//! token gate and acknowledge with `{code, msg, data: {id}}`.

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};

use super::super::error::ApiError;
use super::super::extract::{ApiJson, TrackId};
use super::super::state::AppState;
use super::super::types::{ApiResponse, ResourceId};
use crate::catalog::{Track, TrackRequest};
use crate::user_auth::AuthenticatedUser;

/// Liveness banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain")
    ),
    tag = "System"
)]
pub async fn root() -> &'static str {
    "Zenestreaming works"
}

/// Add a track
///
/// POST /music
#[utoipa::path(
    post,
    path = "/music",
    request_body = TrackRequest,
    responses(
        (status = 201, description = "Music successfully added!", body = ApiResponse<ResourceId>),
        (status = 400, description = "Missing field, invalid genre or invalid date"),
        (status = 401, description = "Invalid or expired token"),
        (status = 403, description = "Token is required"),
        (status = 500, description = "Database error")
    ),
    security(("bearer_auth" = [])),
    tag = "Music"
)]
pub async fn create_track(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<TrackRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ResourceId>>), ApiError> {
    let id = state.catalog.create(req).await?;
    tracing::info!(track_id = id, user = %user.username, "Track added");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_msg(
            "Music successfully added!",
            ResourceId { id },
        )),
    ))
}

/// List every track
///
/// GET /music
#[utoipa::path(
    get,
    path = "/music",
    responses(
        (status = 200, description = "All tracks", body = Vec<Track>),
        (status = 500, description = "Database error")
    ),
    tag = "Music"
)]
pub async fn list_tracks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Track>>, ApiError> {
    Ok(Json(state.catalog.list().await?))
}

/// Fetch one track
///
/// GET /music/{id}
#[utoipa::path(
    get,
    path = "/music/{id}",
    params(("id" = i64, Path, description = "Track id")),
    responses(
        (status = 200, description = "The track", body = Track),
        (status = 404, description = "Music not found."),
        (status = 500, description = "Database error")
    ),
    tag = "Music"
)]
pub async fn get_track(
    State(state): State<Arc<AppState>>,
    TrackId(id): TrackId,
) -> Result<Json<Track>, ApiError> {
    Ok(Json(state.catalog.get(id).await?))
}

/// Change some fields of a track
///
/// PATCH /music/{id}
#[utoipa::path(
    patch,
    path = "/music/{id}",
    params(("id" = i64, Path, description = "Track id")),
    request_body = TrackRequest,
    responses(
        (status = 200, description = "Music successfully updated!", body = ApiResponse<ResourceId>),
        (status = 400, description = "No fields, invalid genre or invalid date"),
        (status = 401, description = "Invalid or expired token"),
        (status = 403, description = "Token is required"),
        (status = 404, description = "Music not found."),
        (status = 500, description = "Database error")
    ),
    security(("bearer_auth" = [])),
    tag = "Music"
)]
pub async fn update_track(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    TrackId(id): TrackId,
    ApiJson(req): ApiJson<TrackRequest>,
) -> Result<Json<ApiResponse<ResourceId>>, ApiError> {
    state.catalog.update(id, req).await?;
    tracing::info!(track_id = id, user = %user.username, "Track updated");
    Ok(Json(ApiResponse::with_msg(
        "Music successfully updated!",
        ResourceId { id },
    )))
}

/// Remove a track
///
/// DELETE /music/{id}
#[utoipa::path(
    delete,
    path = "/music/{id}",
    params(("id" = i64, Path, description = "Track id")),
    responses(
        (status = 200, description = "Music successfully deleted!", body = ApiResponse<ResourceId>),
        (status = 401, description = "Invalid or expired token"),
        (status = 403, description = "Token is required"),
        (status = 404, description = "Music not found."),
        (status = 500, description = "Database error")
    ),
    security(("bearer_auth" = [])),
    tag = "Music"
)]
pub async fn delete_track(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    TrackId(id): TrackId,
) -> Result<Json<ApiResponse<ResourceId>>, ApiError> {
    state.catalog.delete(id).await?;
    tracing::info!(track_id = id, user = %user.username, "Track deleted");
    Ok(Json(ApiResponse::with_msg(
        "Music successfully deleted!",
        ResourceId { id },
    )))
}

/// Newest podcast episodes
///
/// GET /newepisodes
#[utoipa::path(
    get,
    path = "/newepisodes",
    responses(
        (status = 200, description = "Up to ten podcast episodes, newest first", body = Vec<Track>),
        (status = 500, description = "Database error")
    ),
    tag = "Music"
)]
pub async fn new_episodes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Track>>, ApiError> {
    Ok(Json(state.catalog.newest_podcast_episodes().await?))
}
