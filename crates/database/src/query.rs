use crate::error::StoreError;
use crate::session::Session;
use crate::sql;
use core_types::{Direction, Record, Value};
use sqlx::FromRow;
use sqlx::sqlite::SqliteRow;
use std::marker::PhantomData;

/// Fluent construction of one bounded read query.
///
/// Filters accumulate as conjunctive equality clauses across calls; the
/// ordering clause and the limit are last-call-wins. The builder performs
/// no I/O and touches no session until `execute`, which renders exactly
/// one parameterized SELECT; values are bound positionally, never
/// interpolated into the statement text.
pub struct QueryBuilder<R> {
    filters: Vec<(String, Value)>,
    order: Option<(String, Direction)>,
    limit: Option<u32>,
    _record: PhantomData<R>,
}

impl<R> Default for QueryBuilder<R>
where
    R: Record + for<'r> FromRow<'r, SqliteRow>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> QueryBuilder<R>
where
    R: Record + for<'r> FromRow<'r, SqliteRow>,
{
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            order: None,
            limit: None,
            _record: PhantomData,
        }
    }

    /// Appends one `column = value` conjunct. Repeated calls accumulate.
    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    /// Sets the single ordering clause. The last call wins.
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    /// Sets the result-count bound. The last call wins.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Renders and runs the accumulated query, mapping each row back into
    /// `R` by positional field correspondence. Column names are validated
    /// against the schema before anything reaches the statement text;
    /// absent clauses are simply omitted.
    pub async fn execute(self, session: &mut Session) -> Result<Vec<R>, StoreError> {
        let schema = R::schema();
        for (column, _) in &self.filters {
            if !schema.has_column(column) {
                return Err(StoreError::UnknownColumn {
                    table: schema.table,
                    column: column.clone(),
                });
            }
        }
        if let Some((column, _)) = &self.order {
            if !schema.has_column(column) {
                return Err(StoreError::UnknownColumn {
                    table: schema.table,
                    column: column.clone(),
                });
            }
        }

        let mut statement = format!(
            "SELECT {} FROM {}",
            sql::select_columns(schema),
            schema.table
        );
        if !self.filters.is_empty() {
            let conjuncts: Vec<String> = self
                .filters
                .iter()
                .map(|(column, _)| format!("{column} = ?"))
                .collect();
            statement.push_str(" WHERE ");
            statement.push_str(&conjuncts.join(" AND "));
        }
        if let Some((column, direction)) = &self.order {
            statement.push_str(" ORDER BY ");
            statement.push_str(column);
            statement.push(' ');
            statement.push_str(direction.as_sql());
        }
        if self.limit.is_some() {
            statement.push_str(" LIMIT ?");
        }

        let target = session.target().to_string();
        let mut query = sqlx::query(&statement);
        for (_, value) in self.filters {
            query = sql::bind_value(query, value);
        }
        if let Some(limit) = self.limit {
            query = query.bind(limit as i64);
        }

        let rows = query
            .fetch_all(session.conn())
            .await
            .map_err(|e| StoreError::persistence("query", &target, e))?;
        rows.iter()
            .map(|r| R::from_row(r))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::persistence("query", &target, e))
    }
}
