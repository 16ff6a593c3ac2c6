use crate::schema::Schema;
use crate::value::Value;

/// A typed entity persisted as one row of its schema's table.
///
/// Lifecycle: constructed in memory with `id() == None`, persisted by
/// `create` (storage assigns the id), mutated via `update`, removed via
/// `delete`. The id is immutable once assigned.
///
/// Invariant: `values()` returns the non-id field values in exactly the
/// order of `schema().columns`; the `database` crate binds them
/// positionally against that column list.
pub trait Record: Send + Sized {
    /// The fixed storage description of this type.
    fn schema() -> &'static Schema;

    /// The storage-assigned identifier, `None` until persisted.
    fn id(&self) -> Option<i64>;

    /// The current field values, in schema column order, excluding `id`.
    fn values(&self) -> Vec<Value>;
}
