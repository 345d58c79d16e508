//! Repository layer.
//!
//! [`TodoRepository`] is the storage seam used by the HTTP handlers. Two
//! implementations exist: [`PgTodoRepo`] for PostgreSQL and
//! [`InMemoryTodoRepo`] for tests and local experiments.

pub mod error;
pub mod memory;
pub mod todo_repo;

pub use error::RepoError;
pub use memory::InMemoryTodoRepo;
pub use todo_repo::{PgTodoRepo, TodoRepository};
