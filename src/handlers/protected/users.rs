use axum::{extract::State, Extension, Json};

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::database::models::UserPublic;
use crate::error::ApiError;

/// GET /api/v1/users/me
pub async fn me_get(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
) -> Result<Json<UserPublic>, ApiError> {
    Ok(Json(state.users().me(&caller).await?))
}
