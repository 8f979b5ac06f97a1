//! SQLite user storage

pub mod db;
pub mod migrations;
pub mod users;

// Re-exports for convenience
pub use db::{create_pool, get_connection, BotUser, DbConnection, DbPool, InsertOutcome};
pub use users::{SqliteUserStore, UserStore};
