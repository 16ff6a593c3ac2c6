//! # Database Crate
//!
//! This crate is the data-access core: generic CRUD persistence for
//! schema-described record types across a sharded relational backend.
//!
//! ## Architectural Principles
//!
//! - **One Shard Per Operation:** Every operation targets exactly one
//!   physical database: a shard selected by key, or the central database.
//!   There is no cross-shard atomicity and no distributed coordination.
//! - **Typed Error Domain:** Driver faults are caught only at the
//!   `Repository`/`QueryBuilder` operation boundary, where the transaction
//!   is rolled back and the fault is re-raised as a `StoreError` carrying
//!   the original cause. A read miss is `Ok(None)`, not a fault; nothing
//!   is ever silently swallowed.
//! - **Asynchronous & Pooled:** All I/O is async. Each physical target has
//!   its own bounded connection pool; the pool is the only shared mutable
//!   resource, and the sessions it hands out are single-flow.
//! - **Explicit Wiring:** The `Registry` is constructed once from the
//!   storage configuration and passed by reference, not read from
//!   import-time globals.
//!
//! ## Public API
//!
//! - `Registry`: the process-wide handle to the central pool and all shard
//!   pools, with key-based routing and central fallback.
//! - `ConnectionPool` / `Session`: bounded pooling per target, unit-of-work
//!   sessions.
//! - `Repository`: generic transactional CRUD for a `Record` type.
//! - `QueryBuilder`: fluent filter/order/limit construction of one bounded
//!   read query.
//! - `ShardRouter` / `stable_hash`: deterministic, versioned key routing.
//! - `StoreError`: the typed error domain of this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod pool;
pub mod query;
pub mod registry;
pub mod repository;
pub mod router;
pub mod session;

mod sql;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use pool::{CENTRAL_TARGET, ConnectionPool, Target};
pub use query::QueryBuilder;
pub use registry::Registry;
pub use repository::{DEFAULT_LIST_LIMIT, Repository};
pub use router::{ShardRouter, stable_hash};
pub use session::Session;
