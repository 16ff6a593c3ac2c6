//! # Core Types Crate
//!
//! This crate is the shared vocabulary of the data-access layer. It defines
//! the metadata that describes how a record maps to relational storage,
//! and nothing else: no SQL, no driver types, no I/O.
//!
//! ## Architectural Principles
//!
//! - **Metadata Only:** A `Schema` is an ordered list of `(name, type)`
//!   column descriptors, fixed at definition time. All SQL rendering that
//!   consumes this metadata lives in the `database` crate.
//! - **No Reflection:** Every persistable type declares its schema
//!   explicitly through the `Record` trait. Field sets are `'static` data,
//!   not runtime-inspected state.
//!
//! ## Public API
//!
//! - `Schema`, `Column`, `FieldType`: the storage description of a record type.
//! - `Value`: the scalar domain that record fields are lowered into for binding.
//! - `Record`: the trait a persistable type implements to opt into the layer.
//! - `Direction`: ordering direction for bounded read queries.

pub mod enums;
pub mod record;
pub mod schema;
pub mod value;

// Re-export the core types to provide a clean public API.
pub use enums::Direction;
pub use record::Record;
pub use schema::{Column, FieldType, Schema};
pub use value::Value;
