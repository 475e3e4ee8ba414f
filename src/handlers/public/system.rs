use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Wishlist API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "family_members": "/api/v1/family-members/[:id] (protected)",
            "users": "/api/v1/users/me (protected), /api/v1/users/:id (elevated)",
            "wishlist": "/api/v1/wishlist/ (public), /api/v1/wishlist/admin (elevated)",
            "health": "/health (public)",
        }
    }))
}

/// GET /health - 503 when the store cannot be reached
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok", "timestamp": now })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable", "timestamp": now })),
            )
        }
    }
}
