pub mod health;
pub mod todos;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the route tree.
///
/// ```text
/// GET    /                 list todos
/// GET    /health           service + storage health
///
/// /todos
///   GET    /               list todos
///   POST   /               create todo
///   GET    /{id}           get todo
///   PATCH  /{id}           edit todo
///   DELETE /{id}           delete todo
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::todos::list))
        .merge(health::router())
        .nest("/todos", todos::router())
}
