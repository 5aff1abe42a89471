use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::service::{AuthResponse, LoginRequest, RegisterRequest};
use crate::gateway::error::ApiError;
use crate::gateway::extract::ApiJson;
use crate::gateway::{
    state::AppState,
    types::{ApiResponse, ResourceId},
};

/// Register a new user
///
/// POST /register
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<ResourceId>),
        (status = 400, description = "Username or password missing"),
        (status = 500, description = "User could not be created")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ResourceId>>), ApiError> {
    let id = state.user_auth.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_msg(
            "User registered successfully",
            ResourceId { id },
        )),
    ))
}

/// Login user
///
/// POST /login
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid username or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let resp = state.user_auth.login(req).await?;
    Ok(Json(resp))
}
