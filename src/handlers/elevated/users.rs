use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::database::models::Message;
use crate::error::ApiError;

/// DELETE /api/v1/users/:id - removes the user and every family member it owns
pub async fn user_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    Ok(Json(state.users().delete(&caller, id).await?))
}

/// DELETE /api/v1/users/me - always refused by the self-delete rule
pub async fn me_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
) -> Result<Json<Message>, ApiError> {
    Ok(Json(state.users().delete(&caller, caller.id).await?))
}
