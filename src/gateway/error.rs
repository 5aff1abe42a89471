//! HTTP mapping for service errors.
//!
//! Every failure leaves the gateway as `{code, msg}` with the status below.
//! Store failures are logged here and reach the caller only as a generic message.
//!
//! | Error                         | Status |
//! |-------------------------------|--------|
//! | validation / bad body         | 400    |
//! | bad login                     | 400    |
//! | missing bearer token          | 403    |
//! | invalid or expired token      | 401    |
//! | unknown track id              | 404    |
//! | store / hashing / signing     | 500    |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::types::{ApiResponse, error_codes};
use crate::catalog::CatalogError;
use crate::user_auth::AuthError;

#[derive(Debug)]
pub enum ApiError {
    /// Body could not be decoded
    BadRequest(String),
    /// Path id does not name any track
    TrackNotFound(String),
    Catalog(CatalogError),
    Auth(AuthError),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl ApiError {
    /// Status, error code and caller-facing message
    pub fn parts(&self) -> (StatusCode, i32, String) {
        match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_PARAMETER,
                msg.clone(),
            ),
            ApiError::TrackNotFound(_) => not_found(),
            ApiError::Catalog(err) => match err {
                CatalogError::Validation(e) => (
                    StatusCode::BAD_REQUEST,
                    error_codes::INVALID_PARAMETER,
                    e.to_string(),
                ),
                CatalogError::NotFound(_) => not_found(),
                CatalogError::Store(_) => internal("An error occurred in the database."),
            },
            ApiError::Auth(err) => match err {
                AuthError::MissingCredentials => (
                    StatusCode::BAD_REQUEST,
                    error_codes::INVALID_PARAMETER,
                    err.to_string(),
                ),
                AuthError::InvalidCredentials => (
                    StatusCode::BAD_REQUEST,
                    error_codes::INVALID_CREDENTIALS,
                    err.to_string(),
                ),
                AuthError::MissingToken => (
                    StatusCode::FORBIDDEN,
                    error_codes::MISSING_AUTH,
                    err.to_string(),
                ),
                AuthError::InvalidToken => (
                    StatusCode::UNAUTHORIZED,
                    error_codes::AUTH_FAILED,
                    err.to_string(),
                ),
                AuthError::UsernameTaken => internal("Error registering user"),
                AuthError::Hashing(_) | AuthError::TokenIssue(_) | AuthError::Store(_) => {
                    internal("Internal server error")
                }
            },
        }
    }

    fn log(&self) {
        match self {
            ApiError::TrackNotFound(raw) => tracing::debug!(id = %raw, "Malformed track id"),
            ApiError::Catalog(CatalogError::Store(e)) => {
                tracing::error!("Catalog store failure: {}", e)
            }
            ApiError::Auth(AuthError::UsernameTaken) => {
                tracing::warn!("Registration attempt for existing user")
            }
            ApiError::Auth(AuthError::InvalidCredentials) => tracing::warn!("Login failed"),
            ApiError::Auth(
                e @ (AuthError::Hashing(_) | AuthError::TokenIssue(_) | AuthError::Store(_)),
            ) => tracing::error!("Auth failure: {}", e),
            _ => {}
        }
    }
}

fn not_found() -> (StatusCode, i32, String) {
    (
        StatusCode::NOT_FOUND,
        error_codes::TRACK_NOT_FOUND,
        "Music not found.".to_string(),
    )
}

fn internal(msg: &str) -> (StatusCode, i32, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        msg.to_string(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let (status, code, msg) = self.parts();
        (status, Json(ApiResponse::<()>::error(code, msg))).into_response()
    }
}
