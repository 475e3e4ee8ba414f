use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::CurrentUser;
use crate::error::ApiError;

pub const NOT_ENOUGH_PRIVILEGES: &str = "The user doesn't have enough privileges";

/// Elevated tier gate. Must run inside `current_user_middleware`.
pub async fn require_superuser_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| ApiError::unauthorized(super::auth::INVALID_CREDENTIALS))?;

    if !user.is_superuser {
        tracing::warn!("User {} denied elevated route {}", user.id, request.uri().path());
        return Err(ApiError::forbidden(NOT_ENOUGH_PRIVILEGES));
    }

    Ok(next.run(request).await)
}
