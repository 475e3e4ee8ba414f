// handlers/public/mod.rs - endpoints that need no identity

pub mod system;
pub mod wishlist;

use axum::{routing::get, Router};

use crate::app::AppState;

/// Served at the root, outside `/api/v1`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
}

/// Mounted under `/api/v1`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(wishlist::wishlist_get))
        .route("/wishlist/", get(wishlist::wishlist_get))
}
