pub mod access;
pub mod family_members;
pub mod users;
pub mod wishlist;

pub use family_members::FamilyMemberService;
pub use users::UserService;
pub use wishlist::WishlistService;

use thiserror::Error;

use crate::api::validate::FieldErrors;
use crate::config::ApiConfig;
use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{message}")]
    Validation { message: String, field_errors: FieldErrors },

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Export failed: {0}")]
    Export(String),
}

impl ServiceError {
    pub fn field(field: &str, problem: impl Into<String>) -> Self {
        let mut field_errors = FieldErrors::new();
        field_errors.insert(field.to_string(), problem.into());
        ServiceError::Validation {
            message: "Invalid request parameters".to_string(),
            field_errors,
        }
    }
}

/// Offset pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Pagination {
    /// Apply defaults, reject negatives, clamp `limit` to the configured maximum
    pub fn new(skip: Option<i64>, limit: Option<i64>, api: &ApiConfig) -> Result<Self, ServiceError> {
        let skip = skip.unwrap_or(0);
        let limit = limit.unwrap_or(api.default_page_limit);

        if skip < 0 {
            return Err(ServiceError::field("skip", "Input should be greater than or equal to 0"));
        }
        if limit < 0 {
            return Err(ServiceError::field("limit", "Input should be greater than or equal to 0"));
        }

        Ok(Self {
            skip,
            limit: limit.min(api.max_page_limit),
        })
    }
}
