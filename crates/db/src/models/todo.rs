//! Todo entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::error::CoreError;
use todo_core::todo::validate_title;
use todo_core::types::DbId;

/// A row from the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub completed: bool,
}

/// DTO for creating a new todo. A client-supplied `id` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    /// Defaults to `false` if omitted.
    #[serde(default)]
    pub completed: bool,
}

impl CreateTodo {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)
    }
}

/// DTO for partially updating a todo. Absent or `null` fields keep their
/// stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }

    /// Validate the fields that are present. Emptiness is not checked here;
    /// the repository rejects empty updates.
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    /// Apply the present fields to `todo` in place.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}
