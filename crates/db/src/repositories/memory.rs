//! In-memory [`TodoRepository`] for tests and database-free runs.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use todo_core::todo::ENTITY;
use todo_core::types::DbId;

use super::{RepoError, TodoRepository};
use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<DbId, Todo>,
    /// Last id handed out. Ids are never reused, even after deletes.
    last_id: DbId,
}

impl Table {
    fn insert(&mut self, title: String, completed: bool) -> Todo {
        self.last_id += 1;
        let todo = Todo {
            id: self.last_id,
            title,
            completed,
        };
        self.rows.insert(todo.id, todo.clone());
        todo
    }
}

/// Mirrors the semantics of [`PgTodoRepo`](super::PgTodoRepo) over a
/// `BTreeMap`, and counts every call so tests can assert that rejected
/// requests never reached storage.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepo {
    table: RwLock<Table>,
    calls: AtomicUsize,
}

impl InMemoryTodoRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository methods invoked so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepo {
    async fn prepare_database(
        &self,
        drop_existing: bool,
        seed_rows: &[String],
    ) -> Result<(), RepoError> {
        self.record_call();
        let mut table = self.table.write().await;
        if drop_existing {
            *table = Table::default();
        }
        for title in seed_rows {
            table.insert(title.clone(), false);
        }
        Ok(())
    }

    async fn find_one(&self, id: DbId) -> Result<Option<Todo>, RepoError> {
        self.record_call();
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, RepoError> {
        self.record_call();
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn create(&self, input: &CreateTodo) -> Result<Todo, RepoError> {
        self.record_call();
        let mut table = self.table.write().await;
        Ok(table.insert(input.title.clone(), input.completed))
    }

    async fn edit(&self, id: DbId, input: &UpdateTodo) -> Result<Todo, RepoError> {
        self.record_call();
        if input.is_empty() {
            return Err(RepoError::InvalidUpdate("no fields to update".into()));
        }

        let mut table = self.table.write().await;
        let todo = table
            .rows
            .get_mut(&id)
            .ok_or(RepoError::NotFound { entity: ENTITY, id })?;
        input.apply_to(todo);
        Ok(todo.clone())
    }

    async fn delete(&self, id: DbId) -> Result<(), RepoError> {
        self.record_call();
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound { entity: ENTITY, id })
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        self.record_call();
        Ok(())
    }
}
