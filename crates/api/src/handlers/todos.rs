//! Handlers for the `/todos` resource.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use todo_core::error::CoreError;
use todo_core::todo::ENTITY;
use todo_core::types::DbId;
use todo_db::models::todo::{CreateTodo, Todo, UpdateTodo};

use crate::error::{AppError, AppResult};
use crate::middleware::binding::{JsonBody, TodoIdPath};
use crate::state::AppState;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedTodo {
    pub id: DbId,
}

/// GET / and GET /todos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Todo>>> {
    let todos = state.todos.find_all().await?;
    Ok(Json(todos))
}

/// GET /todos/{id}
///
/// A missing row is a 404, not a repository error.
pub async fn get_by_id(
    State(state): State<AppState>,
    TodoIdPath(id): TodoIdPath,
) -> AppResult<Json<Todo>> {
    let todo = state
        .todos
        .find_one(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(todo))
}

/// POST /todos
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTodo>,
) -> AppResult<Json<Todo>> {
    input.validate()?;

    let todo = state.todos.create(&input).await?;

    tracing::info!(todo_id = todo.id, "Todo created");

    Ok(Json(todo))
}

/// PATCH /todos/{id}
pub async fn update(
    State(state): State<AppState>,
    TodoIdPath(id): TodoIdPath,
    JsonBody(input): JsonBody<UpdateTodo>,
) -> AppResult<Json<Todo>> {
    input.validate()?;

    let todo = state.todos.edit(id, &input).await?;

    tracing::info!(todo_id = id, "Todo updated");

    Ok(Json(todo))
}

/// DELETE /todos/{id}
pub async fn delete(
    State(state): State<AppState>,
    TodoIdPath(id): TodoIdPath,
) -> AppResult<Json<DeletedTodo>> {
    state.todos.delete(id).await?;

    tracing::info!(todo_id = id, "Todo deleted");

    Ok(Json(DeletedTodo { id }))
}
