// handlers/elevated/mod.rs - superuser-only endpoints
//
// Callers reach these only after `current_user_middleware` and
// `require_superuser_middleware` have both passed.

pub mod users;
pub mod wishlist;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist/admin", get(wishlist::admin_wishlist_get))
        .route("/users/me", delete(users::me_delete))
        .route("/users/:id", delete(users::user_delete))
}
