//! Repository for the `todos` table.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use todo_core::todo::ENTITY;
use todo_core::types::DbId;

use super::RepoError;
use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

/// Column list shared across queries.
const COLUMNS: &str = "id, title, completed";

/// Storage operations for todo items.
///
/// Every method returns a future owned by the caller. Dropping it (for
/// instance when the HTTP request is cancelled or times out) abandons the
/// in-flight statement.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Ensure the `todos` table exists, dropping it first when
    /// `drop_existing` is set, then insert one row per seed title.
    async fn prepare_database(
        &self,
        drop_existing: bool,
        seed_rows: &[String],
    ) -> Result<(), RepoError>;

    /// Find a todo by id. `Ok(None)` when the row does not exist.
    async fn find_one(&self, id: DbId) -> Result<Option<Todo>, RepoError>;

    /// All todos ordered by id.
    async fn find_all(&self) -> Result<Vec<Todo>, RepoError>;

    /// Insert a todo and return it with its generated id.
    async fn create(&self, input: &CreateTodo) -> Result<Todo, RepoError>;

    /// Apply the fields present in `input`. Empty updates and missing ids
    /// are errors.
    async fn edit(&self, id: DbId, input: &UpdateTodo) -> Result<Todo, RepoError>;

    /// Hard-delete a todo. Deleting a missing id is an error.
    async fn delete(&self, id: DbId) -> Result<(), RepoError>;

    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), RepoError>;
}

/// PostgreSQL-backed [`TodoRepository`].
///
/// Holds a clone of the shared pool; every statement except schema setup
/// runs under `statement_timeout`.
#[derive(Debug, Clone)]
pub struct PgTodoRepo {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PgTodoRepo {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    async fn bounded<T, F>(&self, statement: F) -> Result<T, RepoError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        with_deadline(self.statement_timeout, statement).await
    }
}

/// Run `statement`, giving up with [`RepoError::DeadlineExceeded`] once
/// `deadline` elapses. The statement future is dropped on expiry.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, statement: F) -> Result<T, RepoError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(deadline, statement).await {
        Ok(result) => result.map_err(RepoError::from),
        Err(_) => {
            tracing::warn!(deadline_ms = deadline.as_millis() as u64, "Statement deadline exceeded");
            Err(RepoError::DeadlineExceeded(deadline))
        }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepo {
    async fn prepare_database(
        &self,
        drop_existing: bool,
        seed_rows: &[String],
    ) -> Result<(), RepoError> {
        if drop_existing {
            sqlx::query("DROP TABLE IF EXISTS todos")
                .execute(&self.pool)
                .await?;
            tracing::info!("Dropped existing todos table");
        }

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos ( \
                 id BIGSERIAL PRIMARY KEY, \
                 title TEXT NOT NULL, \
                 completed BOOLEAN NOT NULL DEFAULT FALSE \
             )",
        )
        .execute(&self.pool)
        .await?;

        if !seed_rows.is_empty() {
            let result = sqlx::query("INSERT INTO todos (title) SELECT * FROM UNNEST($1::text[])")
                .bind(seed_rows)
                .execute(&self.pool)
                .await?;
            tracing::info!(rows = result.rows_affected(), "Seeded todos table");
        }

        Ok(())
    }

    async fn find_one(&self, id: DbId) -> Result<Option<Todo>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        self.bounded(
            sqlx::query_as::<_, Todo>(&query)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Todo>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM todos ORDER BY id");
        self.bounded(sqlx::query_as::<_, Todo>(&query).fetch_all(&self.pool))
            .await
    }

    async fn create(&self, input: &CreateTodo) -> Result<Todo, RepoError> {
        let query = format!(
            "INSERT INTO todos (title, completed) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        self.bounded(
            sqlx::query_as::<_, Todo>(&query)
                .bind(&input.title)
                .bind(input.completed)
                .fetch_one(&self.pool),
        )
        .await
    }

    /// Uses `COALESCE` so only provided fields are changed.
    async fn edit(&self, id: DbId, input: &UpdateTodo) -> Result<Todo, RepoError> {
        if input.is_empty() {
            return Err(RepoError::InvalidUpdate("no fields to update".into()));
        }

        let query = format!(
            "UPDATE todos SET \
                 title = COALESCE($2, title), \
                 completed = COALESCE($3, completed) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        self.bounded(
            sqlx::query_as::<_, Todo>(&query)
                .bind(id)
                .bind(&input.title)
                .bind(input.completed)
                .fetch_optional(&self.pool),
        )
        .await?
        .ok_or(RepoError::NotFound { entity: ENTITY, id })
    }

    async fn delete(&self, id: DbId) -> Result<(), RepoError> {
        let result = self
            .bounded(
                sqlx::query("DELETE FROM todos WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound { entity: ENTITY, id });
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        self.bounded(crate::health_check(&self.pool)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn statement_finishing_in_time_passes_through() {
        let result = with_deadline(Duration::from_secs(5), async { Ok::<_, sqlx::Error>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn slow_statement_reports_deadline_not_storage_error() {
        let deadline = Duration::from_millis(10);
        let result = with_deadline(deadline, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, sqlx::Error>(())
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.is_deadline());
        assert_eq!(err.to_string(), "Statement deadline of 10ms exceeded");
    }

    #[tokio::test]
    async fn storage_errors_are_not_deadlines() {
        let result = with_deadline(Duration::from_secs(5), async {
            Err::<(), _>(sqlx::Error::PoolTimedOut)
        })
        .await;

        let err = result.unwrap_err();
        assert!(!err.is_deadline());
        assert!(matches!(err, RepoError::Database(sqlx::Error::PoolTimedOut)));
    }
}
