#![allow(dead_code)]

use configuration::TargetSettings;
use core_types::{Column, FieldType, Record, Schema, Value};
use database::ConnectionPool;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Installs a test subscriber once per test binary so the warn/error
/// events from fallback and fault paths show up in captured test output.
/// Subsequent calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub static USER_SCHEMA: Schema = Schema {
    table: "user",
    columns: &[
        Column::new("name", FieldType::Text),
        Column::new("age", FieldType::Integer),
    ],
};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub age: i64,
}

impl User {
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            age,
        }
    }
}

impl Record for User {
    fn schema() -> &'static Schema {
        &USER_SCHEMA
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![Value::from(self.name.clone()), Value::from(self.age)]
    }
}

pub fn db_url(dir: &TempDir, file: &str) -> String {
    format!("sqlite://{}/{}?mode=rwc", dir.path().display(), file)
}

pub fn settings(url: String) -> TargetSettings {
    TargetSettings {
        url,
        pool_size: 2,
        max_overflow: 2,
        acquire_timeout_secs: 1,
    }
}

pub async fn open_pool(dir: &TempDir, file: &str) -> ConnectionPool {
    init_tracing();
    ConnectionPool::open("central", &settings(db_url(dir, file)))
        .await
        .expect("pool should open against a writable temp database")
}
