pub mod auth;
pub mod require_superuser;

pub use auth::current_user_middleware;
pub use require_superuser::require_superuser_middleware;
