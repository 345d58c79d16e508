//! Extractors that turn the URI and body of a request into typed values.
//!
//! Both reject with [`AppError`] so every binding failure is a 400 with the
//! standard `{ "error": ... }` body, and the handler never runs.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use todo_core::todo::validate_id;
use todo_core::types::DbId;

use crate::error::AppError;

/// The `{id}` path segment of a todo route, guaranteed positive.
///
/// ```ignore
/// async fn get_by_id(TodoIdPath(id): TodoIdPath) -> AppResult<Json<Todo>> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TodoIdPath(pub DbId);

impl<S> FromRequestParts<S> for TodoIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(TodoIdPath(validate_id(id)?))
    }
}

/// [`Json`] with every rejection (missing content type, syntax error,
/// wrong field types) mapped to 400.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}
