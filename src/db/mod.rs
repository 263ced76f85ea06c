//! Database module
//!
//! SQLite profile store: connection pool and schema migrations.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
