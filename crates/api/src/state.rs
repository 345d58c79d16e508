use std::sync::Arc;

use todo_db::repositories::TodoRepository;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Todo storage. PostgreSQL in production, in-memory in tests.
    pub todos: Arc<dyn TodoRepository>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
