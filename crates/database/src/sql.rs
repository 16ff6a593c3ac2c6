//! Statement rendering from schema metadata.
//!
//! Identifiers (table and column names) come exclusively from `'static`
//! schema definitions or schema-validated caller input; every value is
//! bound positionally, never interpolated into the statement text.

use core_types::{Schema, Value};
use sqlx::Sqlite;
use sqlx::sqlite::SqliteArguments;

pub(crate) type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Binds one lowered value as the next positional parameter.
pub(crate) fn bind_value(query: SqliteQuery<'_>, value: Value) -> SqliteQuery<'_> {
    match value {
        Value::Null => query.bind(None::<i64>),
        Value::Integer(v) => query.bind(v),
        Value::Real(v) => query.bind(v),
        Value::Text(v) => query.bind(v),
        Value::Blob(v) => query.bind(v),
    }
}

/// The projection list: `id` first, then the schema columns in order.
/// Row decoding relies on this fixed positional correspondence.
pub(crate) fn select_columns(schema: &Schema) -> String {
    let mut columns = String::from("id");
    for column in schema.columns {
        columns.push_str(", ");
        columns.push_str(column.name);
    }
    columns
}

pub(crate) fn select_by_id(schema: &Schema) -> String {
    format!(
        "SELECT {} FROM {} WHERE id = ?",
        select_columns(schema),
        schema.table
    )
}

pub(crate) fn select_all(schema: &Schema) -> String {
    format!(
        "SELECT {} FROM {} LIMIT ?",
        select_columns(schema),
        schema.table
    )
}

pub(crate) fn insert(schema: &Schema) -> String {
    // A schema may declare no columns beyond the implicit id; an empty
    // column list is not valid INSERT syntax.
    if schema.columns.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", schema.table);
    }
    let columns: Vec<&str> = schema.columns.iter().map(|c| c.name).collect();
    let placeholders: Vec<&str> = schema.columns.iter().map(|_| "?").collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.table,
        columns.join(", "),
        placeholders.join(", ")
    )
}

pub(crate) fn update(schema: &Schema, patch_columns: &[&str]) -> String {
    let assignments: Vec<String> = patch_columns.iter().map(|c| format!("{c} = ?")).collect();
    format!(
        "UPDATE {} SET {} WHERE id = ?",
        schema.table,
        assignments.join(", ")
    )
}

pub(crate) fn delete(schema: &Schema) -> String {
    format!("DELETE FROM {} WHERE id = ?", schema.table)
}

pub(crate) fn create_table(schema: &Schema) -> String {
    let mut columns = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
    for column in schema.columns {
        let constraint = if column.nullable { "" } else { " NOT NULL" };
        columns.push(format!(
            "{} {}{}",
            column.name,
            column.kind.sql_type(),
            constraint
        ));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        schema.table,
        columns.join(", ")
    )
}
