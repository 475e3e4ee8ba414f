use axum::{extract::State, response::Response};

use crate::api::format::{csv_attachment, ADMIN_WISHLIST_FILENAME};
use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/wishlist/admin - wishes with the owner's contact details
pub async fn admin_wishlist_get(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state.wishlist().export_with_contacts().await?;
    Ok(csv_attachment(ADMIN_WISHLIST_FILENAME, body))
}
