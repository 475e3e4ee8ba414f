use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::ApiError;

use super::validate::{FieldErrors, Validate};

/// JSON body that has been parsed and has passed its field constraints
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(json_rejection)?;

        value
            .validate()
            .map_err(|field_errors| ApiError::unprocessable_entity("Invalid request body", field_errors))?;

        Ok(ValidJson(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        // Well-formed JSON of the wrong shape (wrong type, missing field)
        JsonRejection::JsonDataError(err) => {
            let mut field_errors = FieldErrors::new();
            field_errors.insert("body".to_string(), err.body_text());
            ApiError::unprocessable_entity("Invalid request body", field_errors)
        }
        JsonRejection::JsonSyntaxError(err) => ApiError::invalid_json(err.body_text()),
        JsonRejection::MissingJsonContentType(err) => ApiError::bad_request(err.body_text()),
        other => ApiError::bad_request(other.body_text()),
    }
}

/// `?skip=&limit=` on list endpoints. Defaults and bounds are applied by `Pagination`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
