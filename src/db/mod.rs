/// Database module for command-palette
///
/// Backs the recency cache's key-value store and the entity lookups with
/// SQLite via sqlx, behind a connection pool.

pub mod adapters;
pub mod connection;
pub mod models;
pub mod queries;

pub use connection::Database;
pub use models::*;
