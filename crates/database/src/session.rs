use sqlx::Sqlite;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqliteConnection;

/// A unit-of-work bound to one pooled connection.
///
/// A session is owned exclusively by the caller that acquired it and holds
/// at most one open transaction at a time; operations take `&mut Session`,
/// so the borrow checker enforces that two operations never run on the
/// same session concurrently. Operations issued on one session execute in
/// submission order.
///
/// Dropping the session returns its connection to the pool. If an
/// operation's future is cancelled mid-transaction, the driver rolls the
/// transaction back before the connection is handed out again, so an
/// aborted operation never leaks an open transaction into the pool.
pub struct Session {
    conn: PoolConnection<Sqlite>,
    target: String,
}

impl Session {
    pub(crate) fn new(conn: PoolConnection<Sqlite>, target: String) -> Self {
        Self { conn, target }
    }

    /// The stable name of the physical target this session is bound to.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Returns the connection to its pool.
    ///
    /// This is just an explicit, self-documenting drop: release happens
    /// exactly once on every path, and a second release is unrepresentable
    /// because the session is consumed.
    pub fn release(self) {}
}
