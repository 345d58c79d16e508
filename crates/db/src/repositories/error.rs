use std::time::Duration;

use todo_core::types::DbId;

/// Failure modes of a [`TodoRepository`](super::TodoRepository) call.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The row targeted by an edit or delete does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The update payload cannot be applied (e.g. it sets no fields).
    #[error("Invalid update: {0}")]
    InvalidUpdate(String),

    /// The statement did not finish before its deadline and was abandoned.
    #[error("Statement deadline of {}ms exceeded", .0.as_millis())]
    DeadlineExceeded(Duration),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    /// True for deadline expiry, as opposed to a storage or domain failure.
    pub fn is_deadline(&self) -> bool {
        matches!(self, RepoError::DeadlineExceeded(_))
    }
}
