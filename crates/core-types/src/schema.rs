use serde::{Deserialize, Serialize};

/// The storage type of a single column.
///
/// These map to the storage-class affinities shared by the relational
/// backends this layer targets; dialect-specific refinements are a
/// collaborator concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Integer,
    Real,
    Text,
    Blob,
}

impl FieldType {
    /// Returns the SQL type name used when rendering DDL for this column.
    pub fn sql_type(&self) -> &'static str {
        match self {
            FieldType::Integer => "INTEGER",
            FieldType::Real => "REAL",
            FieldType::Text => "TEXT",
            FieldType::Blob => "BLOB",
        }
    }
}

/// One named, typed column of a record's storage schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: FieldType,
    pub nullable: bool,
}

impl Column {
    pub const fn new(name: &'static str, kind: FieldType) -> Self {
        Self { name, kind, nullable: false }
    }

    pub const fn nullable(name: &'static str, kind: FieldType) -> Self {
        Self { name, kind, nullable: true }
    }
}

/// The storage description of one record type: a table name plus an
/// ordered, fixed set of columns.
///
/// The integer primary key (`id`) is implicit and assigned by storage on
/// insert; it is never listed in `columns`. Column order is significant:
/// `Record::values` must produce values in exactly this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub table: &'static str,
    pub columns: &'static [Column],
}

impl Schema {
    /// Looks up a column by name. Returns `None` for the implicit `id`
    /// column as well as for names outside the schema.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether `name` is addressable in filters and ordering clauses.
    /// The implicit `id` column is addressable even though it is not
    /// part of `columns`.
    pub fn has_column(&self, name: &str) -> bool {
        name == "id" || self.column(name).is_some()
    }
}
