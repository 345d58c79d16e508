//! Integration tests for `PgTodoRepo` against a real PostgreSQL database.
//!
//! `#[sqlx::test]` creates a fresh database per test from `DATABASE_URL`,
//! which must point at a server where the test user may create databases.

use std::time::Duration;

use assert_matches::assert_matches;
use sqlx::PgPool;
use todo_db::models::todo::{CreateTodo, UpdateTodo};
use todo_db::repositories::{PgTodoRepo, RepoError, TodoRepository};

async fn prepared_repo(pool: PgPool) -> PgTodoRepo {
    let repo = PgTodoRepo::new(pool, Duration::from_secs(10));
    repo.prepare_database(false, &[]).await.unwrap();
    repo
}

fn new_todo(title: &str) -> CreateTodo {
    CreateTodo {
        title: title.to_string(),
        completed: false,
    }
}

#[sqlx::test(migrations = false)]
async fn test_create_and_find(pool: PgPool) {
    let repo = prepared_repo(pool).await;

    let created = repo.create(&new_todo("buy milk")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.title, "buy milk");
    assert!(!created.completed);

    let found = repo.find_one(created.id).await.unwrap();
    assert_eq!(found, Some(created));
}

#[sqlx::test(migrations = false)]
async fn test_find_missing_is_none(pool: PgPool) {
    let repo = prepared_repo(pool).await;
    assert_eq!(repo.find_one(123_456).await.unwrap(), None);
}

#[sqlx::test(migrations = false)]
async fn test_find_all_ordered_by_id(pool: PgPool) {
    let repo = prepared_repo(pool).await;
    for title in ["one", "two", "three"] {
        repo.create(&new_todo(title)).await.unwrap();
    }

    let todos = repo.find_all().await.unwrap();
    let titles: Vec<_> = todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "two", "three"]);
    assert!(todos.windows(2).all(|w| w[0].id < w[1].id));
}

#[sqlx::test(migrations = false)]
async fn test_partial_edit(pool: PgPool) {
    let repo = prepared_repo(pool).await;
    let todo = repo.create(&new_todo("draft")).await.unwrap();

    let edited = repo
        .edit(
            todo.id,
            &UpdateTodo {
                title: None,
                completed: Some(true),
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.title, "draft");
    assert!(edited.completed);

    let empty = repo.edit(todo.id, &UpdateTodo::default()).await;
    assert_matches!(empty, Err(RepoError::InvalidUpdate(_)));

    let missing = repo
        .edit(
            todo.id + 1000,
            &UpdateTodo {
                title: Some("x".into()),
                completed: None,
            },
        )
        .await;
    assert_matches!(missing, Err(RepoError::NotFound { .. }));
}

#[sqlx::test(migrations = false)]
async fn test_delete_is_strict(pool: PgPool) {
    let repo = prepared_repo(pool).await;
    let todo = repo.create(&new_todo("gone")).await.unwrap();

    repo.delete(todo.id).await.unwrap();
    assert_eq!(repo.find_one(todo.id).await.unwrap(), None);
    assert_matches!(repo.delete(todo.id).await, Err(RepoError::NotFound { .. }));
}

#[sqlx::test(migrations = false)]
async fn test_prepare_database_seeds_and_drops(pool: PgPool) {
    let repo = PgTodoRepo::new(pool, Duration::from_secs(10));

    let seeds = vec!["a".to_string(), "b".to_string()];
    repo.prepare_database(false, &seeds).await.unwrap();
    repo.prepare_database(false, &seeds).await.unwrap();
    assert_eq!(repo.find_all().await.unwrap().len(), 4);

    repo.prepare_database(true, &seeds[..1]).await.unwrap();
    let todos = repo.find_all().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "a");
    assert_eq!(todos[0].id, 1);
}

#[sqlx::test(migrations = false)]
async fn test_slow_statement_hits_deadline(pool: PgPool) {
    let repo = PgTodoRepo::new(pool.clone(), Duration::from_millis(50));
    repo.prepare_database(false, &[]).await.unwrap();

    // Hold an exclusive lock so the next statement blocks.
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("LOCK TABLE todos IN ACCESS EXCLUSIVE MODE")
        .execute(&mut *tx)
        .await
        .unwrap();

    let result = repo.find_all().await;
    assert_matches!(result, Err(RepoError::DeadlineExceeded(_)));

    tx.rollback().await.unwrap();
}

#[sqlx::test(migrations = false)]
async fn test_health_check(pool: PgPool) {
    let repo = PgTodoRepo::new(pool, Duration::from_secs(10));
    repo.health_check().await.unwrap();
}
