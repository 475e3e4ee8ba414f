use axum::{extract::State, response::Response};

use crate::api::format::{csv_attachment, WISHLIST_FILENAME};
use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/wishlist/ - every family member's wishes as CSV
pub async fn wishlist_get(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state.wishlist().export().await?;
    Ok(csv_attachment(WISHLIST_FILENAME, body))
}
