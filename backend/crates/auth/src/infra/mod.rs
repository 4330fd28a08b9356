//! Infrastructure Layer
//!
//! Database implementations of the repository traits.

pub mod sqlite;

pub use sqlite::SqliteStorage;
