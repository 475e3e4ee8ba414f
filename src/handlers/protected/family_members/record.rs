use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::api::ValidJson;
use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::database::models::{FamilyMemberPublic, FamilyMemberUpdate, Message};
use crate::error::ApiError;

/// GET /api/v1/family-members/:id
pub async fn record_get(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<FamilyMemberPublic>, ApiError> {
    Ok(Json(state.family_members().get(&caller, id).await?))
}

/// PUT /api/v1/family-members/:id - partial update, absent fields untouched
pub async fn record_put(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidJson(patch): ValidJson<FamilyMemberUpdate>,
) -> Result<Json<FamilyMemberPublic>, ApiError> {
    Ok(Json(state.family_members().update(&caller, id, patch).await?))
}

/// DELETE /api/v1/family-members/:id
pub async fn record_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    Ok(Json(state.family_members().delete(&caller, id).await?))
}
