//! Extractors that reject with the gateway's error body instead of axum's plain text.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body; malformed or non-JSON bodies become 400 `{code, msg}`
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {}", e.body_text())))?;
        Ok(ApiJson(value))
    }
}

/// `{id}` path segment of `/music/{id}`.
///
/// An id that is not an integer cannot match any row, so it is reported as 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackId(pub i64);

impl<S> FromRequestParts<S> for TrackId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        match raw.trim().parse::<i64>() {
            Ok(id) => Ok(TrackId(id)),
            Err(_) => Err(ApiError::TrackNotFound(raw)),
        }
    }
}
