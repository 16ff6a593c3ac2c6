use crate::error::StoreError;
use crate::session::Session;
use crate::sql;
use core_types::{Record, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Connection, FromRow, Sqlite, Transaction};
use std::marker::PhantomData;

/// Default bound for `get_all` when the caller does not pass a limit.
pub const DEFAULT_LIST_LIMIT: u32 = 100;

/// Generic transactional CRUD over one record type.
///
/// Every operation runs against a caller-provided `Session` and translates
/// any driver fault into `StoreError::Persistence` at the operation
/// boundary, rolling back the operation's transaction first. A read miss
/// is `Ok(None)`, never an error.
///
/// Each mutating operation is exactly one transaction. `update` and
/// `delete` read the row before writing, and that read is *not* inside the
/// transaction: a concurrent writer may interleave between the lookup and
/// the write. Callers that need stronger guarantees must serialize at a
/// higher level.
pub struct Repository<R> {
    _record: PhantomData<R>,
}

impl<R> Default for Repository<R>
where
    R: Record + for<'r> FromRow<'r, SqliteRow>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Repository<R>
where
    R: Record + for<'r> FromRow<'r, SqliteRow>,
{
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }

    /// Issues the schema-derived `CREATE TABLE IF NOT EXISTS` for `R`.
    pub async fn ensure_table(&self, session: &mut Session) -> Result<(), StoreError> {
        let target = session.target().to_string();
        let ddl = sql::create_table(R::schema());
        sqlx::query(&ddl)
            .execute(session.conn())
            .await
            .map_err(|e| StoreError::persistence("ensure_table", &target, e))?;
        Ok(())
    }

    /// Single-row lookup by identifier.
    pub async fn get(&self, session: &mut Session, id: i64) -> Result<Option<R>, StoreError> {
        let target = session.target().to_string();
        let query = sql::select_by_id(R::schema());
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(session.conn())
            .await
            .map_err(|e| StoreError::persistence("get", &target, e))?;
        row.map(|r| R::from_row(&r))
            .transpose()
            .map_err(|e| StoreError::persistence("get", &target, e))
    }

    /// Bounded scan in storage-native order. No ordering guarantee; use
    /// `QueryBuilder` when ordering matters.
    pub async fn get_all(
        &self,
        session: &mut Session,
        limit: Option<u32>,
    ) -> Result<Vec<R>, StoreError> {
        let target = session.target().to_string();
        let query = sql::select_all(R::schema());
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        let rows = sqlx::query(&query)
            .bind(limit as i64)
            .fetch_all(session.conn())
            .await
            .map_err(|e| StoreError::persistence("get_all", &target, e))?;
        rows.iter()
            .map(|r| R::from_row(r))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::persistence("get_all", &target, e))
    }

    /// Inserts `record` in one transaction and returns the stored row with
    /// its assigned identifier populated.
    ///
    /// Faults always propagate; this layer never swallows a storage fault
    /// and reports a missing row instead.
    pub async fn create(&self, session: &mut Session, record: R) -> Result<R, StoreError> {
        let schema = R::schema();
        let target = session.target().to_string();
        let insert = sql::insert(schema);
        let refresh = sql::select_by_id(schema);
        let values = record.values();

        let mut tx = session
            .conn()
            .begin()
            .await
            .map_err(|e| StoreError::persistence("create", &target, e))?;

        let result: Result<R, sqlx::Error> = async {
            let mut query = sqlx::query(&insert);
            for value in values {
                query = sql::bind_value(query, value);
            }
            let outcome = query.execute(&mut *tx).await?;
            let id = outcome.last_insert_rowid();
            let row = sqlx::query(&refresh).bind(id).fetch_one(&mut *tx).await?;
            R::from_row(&row)
        }
        .await;

        match result {
            Ok(created) => {
                tx.commit()
                    .await
                    .map_err(|e| StoreError::persistence("create", &target, e))?;
                Ok(created)
            }
            Err(source) => {
                rollback_quietly(tx, "create").await;
                Err(StoreError::persistence("create", &target, source))
            }
        }
    }

    /// Applies `patch` to the row with `id` in one transaction and returns
    /// the refreshed row. `Ok(None)`, with zero writes, when no row
    /// matches. Patch columns are validated against the schema; the
    /// identifier itself is never patchable.
    pub async fn update(
        &self,
        session: &mut Session,
        id: i64,
        patch: &[(&str, Value)],
    ) -> Result<Option<R>, StoreError> {
        let schema = R::schema();
        for (column, _) in patch {
            if schema.column(column).is_none() {
                return Err(StoreError::UnknownColumn {
                    table: schema.table,
                    column: column.to_string(),
                });
            }
        }

        if self.get(session, id).await?.is_none() {
            return Ok(None);
        }
        if patch.is_empty() {
            return self.get(session, id).await;
        }

        let target = session.target().to_string();
        let columns: Vec<&str> = patch.iter().map(|(c, _)| *c).collect();
        let update = sql::update(schema, &columns);
        let refresh = sql::select_by_id(schema);

        let mut tx = session
            .conn()
            .begin()
            .await
            .map_err(|e| StoreError::persistence("update", &target, e))?;

        let result: Result<R, sqlx::Error> = async {
            let mut query = sqlx::query(&update);
            for (_, value) in patch {
                query = sql::bind_value(query, value.clone());
            }
            query.bind(id).execute(&mut *tx).await?;
            let row = sqlx::query(&refresh).bind(id).fetch_one(&mut *tx).await?;
            R::from_row(&row)
        }
        .await;

        match result {
            Ok(updated) => {
                tx.commit()
                    .await
                    .map_err(|e| StoreError::persistence("update", &target, e))?;
                Ok(Some(updated))
            }
            Err(source) => {
                rollback_quietly(tx, "update").await;
                Err(StoreError::persistence("update", &target, source))
            }
        }
    }

    /// Deletes the row with `id` in one transaction and returns the
    /// pre-deletion snapshot, or `Ok(None)` when no row matches.
    pub async fn delete(&self, session: &mut Session, id: i64) -> Result<Option<R>, StoreError> {
        let Some(existing) = self.get(session, id).await? else {
            return Ok(None);
        };

        let target = session.target().to_string();
        let delete = sql::delete(R::schema());

        let mut tx = session
            .conn()
            .begin()
            .await
            .map_err(|e| StoreError::persistence("delete", &target, e))?;

        match sqlx::query(&delete).bind(id).execute(&mut *tx).await {
            Ok(_) => {
                tx.commit()
                    .await
                    .map_err(|e| StoreError::persistence("delete", &target, e))?;
                Ok(Some(existing))
            }
            Err(source) => {
                rollback_quietly(tx, "delete").await;
                Err(StoreError::persistence("delete", &target, source))
            }
        }
    }
}

/// Rolls back before the fault is surfaced. A rollback failure is logged
/// rather than masking the original fault.
async fn rollback_quietly(tx: Transaction<'_, Sqlite>, operation: &'static str) {
    if let Err(error) = tx.rollback().await {
        tracing::warn!(operation, %error, "rollback after storage fault failed");
    }
}
