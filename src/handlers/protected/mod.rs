// handlers/protected/mod.rs - endpoints that need a resolved `CurrentUser`

pub mod family_members;
pub mod users;

use axum::{routing::get, Router};

use crate::app::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/family-members",
            get(family_members::collection_get).post(family_members::collection_post),
        )
        .route(
            "/family-members/",
            get(family_members::collection_get).post(family_members::collection_post),
        )
        .route(
            "/family-members/:id",
            get(family_members::record_get)
                .put(family_members::record_put)
                .delete(family_members::record_delete),
        )
        .route("/users/me", get(users::me_get))
}
