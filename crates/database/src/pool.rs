use crate::error::StoreError;
use crate::session::Session;
use configuration::TargetSettings;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;

/// The name of the distinguished default target.
pub const CENTRAL_TARGET: &str = "central";

/// One physical database target: an opaque connection string plus a
/// stable name used in routing, errors, and observability events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub url: String,
}

impl Target {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A bounded pool of live connections to one physical target.
///
/// The first connection is established eagerly on open; the pool then
/// grows on demand, holding at least `pool_size` connections once warmed
/// and opening up to `pool_size + max_overflow` under load. It is the
/// only shared mutable resource in this layer and supports concurrent
/// `acquire` from many tasks; the sessions it hands out are not shared.
#[derive(Debug, Clone)]
pub struct ConnectionPool {
    target: Target,
    pool: SqlitePool,
}

impl ConnectionPool {
    /// Opens a pool against the target described by `settings`, establishing
    /// and validating the first connection eagerly. An unreachable or
    /// malformed target surfaces as `StoreError::Connection`; connection
    /// faults are never retried here.
    pub async fn open(
        name: impl Into<String>,
        settings: &TargetSettings,
    ) -> Result<Self, StoreError> {
        let target = Target::new(name, &settings.url);
        let pool = SqlitePoolOptions::new()
            .min_connections(settings.pool_size)
            .max_connections(settings.pool_size + settings.max_overflow)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .connect(&target.url)
            .await
            .map_err(|source| StoreError::Connection {
                target: target.name.clone(),
                source,
            })?;

        Ok(Self { target, pool })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Checks out a session, suspending until a connection frees up or the
    /// configured acquire timeout elapses (`StoreError::PoolExhausted`).
    pub async fn acquire(&self) -> Result<Session, StoreError> {
        match self.pool.acquire().await {
            Ok(conn) => Ok(Session::new(conn, self.target.name.clone())),
            Err(sqlx::Error::PoolTimedOut) => Err(StoreError::PoolExhausted {
                target: self.target.name.clone(),
            }),
            Err(source) => Err(StoreError::Connection {
                target: self.target.name.clone(),
                source,
            }),
        }
    }
}
