//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers bind their input through the extractors in
//! [`crate::middleware::binding`], delegate to the repository held in
//! [`AppState`](crate::state::AppState), and map errors via
//! [`AppError`](crate::error::AppError).

pub mod todos;
