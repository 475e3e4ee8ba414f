use std::sync::Arc;

use axum::{http::HeaderValue, middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::Store;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{current_user_middleware, require_superuser_middleware};
use crate::services::{FamilyMemberService, UserService, WishlistService};

/// Shared per-process state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn family_members(&self) -> FamilyMemberService {
        FamilyMemberService::new(self.store.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.store.clone())
    }

    pub fn wishlist(&self) -> WishlistService {
        WishlistService::new(self.store.clone())
    }
}

/// Full router: public, protected and elevated tiers under `/api/v1`
pub fn app(state: AppState) -> Router {
    let protected = protected::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        current_user_middleware,
    ));

    // Layers run bottom-up: resolve the caller first, then require superuser
    let elevated = elevated::routes()
        .route_layer(middleware::from_fn(require_superuser_middleware))
        .route_layer(middleware::from_fn_with_state(state.clone(), current_user_middleware));

    let api = Router::new()
        .merge(public::api_routes())
        .merge(protected)
        .merge(elevated);

    let mut router = Router::new()
        .merge(public::routes())
        .nest("/api/v1", api)
        .with_state(state.clone());

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security));
    }

    router.layer(TraceLayer::new_for_http())
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if security.cors_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}
