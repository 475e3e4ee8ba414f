use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::api::{ListParams, ValidJson};
use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::database::models::{FamilyMemberCreate, FamilyMemberPublic, FamilyMembersPublic};
use crate::error::ApiError;
use crate::services::Pagination;

/// GET /api/v1/family-members/ - page of visible records plus total count
pub async fn collection_get(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    Query(params): Query<ListParams>,
) -> Result<Json<FamilyMembersPublic>, ApiError> {
    let page = Pagination::new(params.skip, params.limit, &state.config.api)?;
    let members = state.family_members().list(&caller, page).await?;
    Ok(Json(members))
}

/// POST /api/v1/family-members/ - owner is always the caller
pub async fn collection_post(
    State(state): State<AppState>,
    Extension(caller): Extension<CurrentUser>,
    ValidJson(payload): ValidJson<FamilyMemberCreate>,
) -> Result<Json<FamilyMemberPublic>, ApiError> {
    let created = state.family_members().create(&caller, payload).await?;
    Ok(Json(created))
}
