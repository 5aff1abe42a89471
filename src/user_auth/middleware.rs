use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::service::AuthError;
use crate::gateway::{error::ApiError, state::AppState};

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// The token is the text after the first single space; `Bearer  tok` carries
/// no token. A header that is not visible ASCII cannot hold a valid token.
pub fn extract_bearer_token(header_value: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let value = header_value
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let mut parts = value.split(' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidToken);
    }
    Ok(token)
}

/// Bearer-token gate for catalog writes.
///
/// No header → 403, bad signature or expired → 401. On success the caller's
/// `AuthenticatedUser` is inserted into the request extensions.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract Authorization header
    let token = extract_bearer_token(request.headers().get(header::AUTHORIZATION))?;

    // 2. Verify Token
    let user = state.user_auth.verify_token(token).map_err(|e| {
        tracing::debug!(path = %request.uri().path(), "Rejected bearer token: {}", e);
        e
    })?;

    // 3. Inject identity
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
