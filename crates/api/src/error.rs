use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use todo_core::error::CoreError;
use todo_db::repositories::RepoError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`RepoError`] for storage
/// failures, and adds an HTTP-specific variant. Implements [`IntoResponse`] to
/// produce `{ "error": message }` bodies, logging each error tagged by
/// `error_type`:
///
/// - `bind` -- the request could not be bound to typed parameters (400)
/// - `public` -- a normal negative outcome shown to the client (404)
/// - `private` -- anything else (500)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `todo_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed repository call.
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(CoreError::NotFound { entity, id }) => {
                tracing::info!(error_type = "public", entity, id, error = %self, "Lookup miss");
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::Core(CoreError::Validation(msg)) => {
                tracing::warn!(error_type = "bind", error = %msg, "Request validation failed");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::BadRequest(msg) => {
                tracing::warn!(error_type = "bind", error = %msg, "Request binding failed");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Repo(err) => classify_repo_error(err),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Every repository failure is a 500.
///
/// Domain failures (missing edit/delete target, empty update, deadline)
/// carry their message to the client. Raw database errors are logged and
/// replaced by a generic message.
fn classify_repo_error(err: &RepoError) -> (StatusCode, String) {
    match err {
        RepoError::Database(db_err) => {
            tracing::error!(error_type = "private", error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            )
        }
        RepoError::DeadlineExceeded(_) => {
            tracing::error!(error_type = "private", error = %err, "Repository deadline exceeded");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        RepoError::NotFound { .. } | RepoError::InvalidUpdate(_) => {
            tracing::error!(error_type = "private", error = %err, "Repository call failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
