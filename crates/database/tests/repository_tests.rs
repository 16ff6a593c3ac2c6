mod common;

use common::{User, open_pool};
use core_types::{Column, FieldType, Record, Schema, Value};
use database::{Repository, StoreError};
use tempfile::TempDir;

#[tokio::test]
async fn create_then_get_round_trips_with_id_populated() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir, "store.db").await;
    let mut session = pool.acquire().await.unwrap();
    let repo: Repository<User> = Repository::new();
    repo.ensure_table(&mut session).await.unwrap();

    let created = repo
        .create(&mut session, User::new("alice", 30))
        .await
        .unwrap();
    let id = created.id.expect("create must populate the identifier");
    assert_eq!(created.name, "alice");
    assert_eq!(created.age, 30);

    let fetched = repo.get(&mut session, id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn get_returns_none_for_missing_rows() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir, "store.db").await;
    let mut session = pool.acquire().await.unwrap();
    let repo: Repository<User> = Repository::new();
    repo.ensure_table(&mut session).await.unwrap();

    assert_eq!(repo.get(&mut session, 999).await.unwrap(), None);
}

#[tokio::test]
async fn update_applies_patch_and_returns_refreshed_row() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir, "store.db").await;
    let mut session = pool.acquire().await.unwrap();
    let repo: Repository<User> = Repository::new();
    repo.ensure_table(&mut session).await.unwrap();

    let created = repo
        .create(&mut session, User::new("alice", 30))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let updated = repo
        .update(&mut session, id, &[("age", Value::from(31))])
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(updated.age, 31);
    assert_eq!(updated.name, "alice");

    let fetched = repo.get(&mut session, id).await.unwrap().unwrap();
    assert_eq!(fetched.age, 31);
}

#[tokio::test]
async fn update_of_missing_row_returns_none_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir, "store.db").await;
    let mut session = pool.acquire().await.unwrap();
    let repo: Repository<User> = Repository::new();
    repo.ensure_table(&mut session).await.unwrap();

    repo.create(&mut session, User::new("alice", 30))
        .await
        .unwrap();
    let before = repo.get_all(&mut session, None).await.unwrap();

    let result = repo
        .update(&mut session, 999, &[("age", Value::from(50))])
        .await
        .unwrap();
    assert_eq!(result, None);

    let after = repo.get_all(&mut session, None).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn update_rejects_columns_outside_the_schema() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir, "store.db").await;
    let mut session = pool.acquire().await.unwrap();
    let repo: Repository<User> = Repository::new();
    repo.ensure_table(&mut session).await.unwrap();

    let result = repo
        .update(&mut session, 1, &[("shoe_size", Value::from(43))])
        .await;
    assert!(matches!(
        result,
        Err(StoreError::UnknownColumn { table: "user", ref column }) if column == "shoe_size"
    ));
}

#[tokio::test]
async fn delete_returns_the_snapshot_and_removes_the_row() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir, "store.db").await;
    let mut session = pool.acquire().await.unwrap();
    let repo: Repository<User> = Repository::new();
    repo.ensure_table(&mut session).await.unwrap();

    let created = repo
        .create(&mut session, User::new("alice", 30))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let snapshot = repo.delete(&mut session, id).await.unwrap();
    assert_eq!(snapshot, Some(created));
    assert_eq!(repo.get(&mut session, id).await.unwrap(), None);

    // Deleting again is a miss, not a fault.
    assert_eq!(repo.delete(&mut session, id).await.unwrap(), None);
}

#[tokio::test]
async fn get_all_honors_the_limit() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir, "store.db").await;
    let mut session = pool.acquire().await.unwrap();
    let repo: Repository<User> = Repository::new();
    repo.ensure_table(&mut session).await.unwrap();

    for i in 0..50 {
        repo.create(&mut session, User::new(&format!("user_{i:02}"), i))
            .await
            .unwrap();
    }

    let bounded = repo.get_all(&mut session, Some(10)).await.unwrap();
    assert_eq!(bounded.len(), 10);

    let defaulted = repo.get_all(&mut session, None).await.unwrap();
    assert_eq!(defaulted.len(), 50);
}

// A record whose schema requires `body`, used to force a storage fault
// inside `create` and observe the rollback.
static NOTE_SCHEMA: Schema = Schema {
    table: "note",
    columns: &[Column::new("body", FieldType::Text)],
};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
struct Note {
    id: Option<i64>,
    body: Option<String>,
}

impl Record for Note {
    fn schema() -> &'static Schema {
        &NOTE_SCHEMA
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![Value::from(self.body.clone())]
    }
}

#[tokio::test]
async fn failed_create_propagates_and_leaves_no_partial_row() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir, "store.db").await;
    let mut session = pool.acquire().await.unwrap();
    let repo: Repository<Note> = Repository::new();
    repo.ensure_table(&mut session).await.unwrap();

    // NULL into a NOT NULL column: the insert fails inside the transaction.
    let result = repo.create(&mut session, Note { id: None, body: None }).await;
    assert!(matches!(
        result,
        Err(StoreError::Persistence { operation: "create", .. })
    ));

    let rows = repo.get_all(&mut session, None).await.unwrap();
    assert!(rows.is_empty());
}
