use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::{validate_token, CurrentUser};
use crate::error::ApiError;

pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";

/// Resolves the bearer token to a live user and stores it as a `CurrentUser` extension
pub async fn current_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers()).map_err(|msg| {
        tracing::debug!("Rejected request without usable bearer: {}", msg);
        ApiError::unauthorized(INVALID_CREDENTIALS)
    })?;

    let claims = validate_token(token, &state.config.security)?;

    let user = state
        .store
        .get_user(claims.sub)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !user.is_active {
        tracing::warn!("Inactive user {} attempted access", user.id);
        return Err(ApiError::bad_request("Inactive user"));
    }

    request.extensions_mut().insert(CurrentUser::from(&user));
    Ok(next.run(request).await)
}

/// Token from `Authorization: Bearer <token>`
fn extract_bearer(headers: &HeaderMap) -> Result<&str, &'static str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("Empty bearer token");
    }
    Ok(token)
}
