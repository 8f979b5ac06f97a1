use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};

use super::migrations::run_migrations;
use crate::core::AppResult;

/// A chat the bot has greeted, stored on the first `/start`.
#[derive(Debug, Clone, PartialEq)]
pub struct BotUser {
    /// Telegram chat ID (primary key)
    pub chat_id: i64,
    /// Telegram username, empty when the sender has none
    pub username: String,
    /// "first last" name of the sender
    pub fullname: String,
    pub longitude: f64,
    pub latitude: f64,
    pub address: String,
}

impl BotUser {
    /// A freshly greeted user: no coordinates or address yet.
    pub fn new(chat_id: i64, username: impl Into<String>, fullname: impl Into<String>) -> Self {
        Self {
            chat_id,
            username: username.into(),
            fullname: fullname.into(),
            longitude: 0.0,
            latitude: 0.0,
            address: String::new(),
        }
    }
}

/// Result of an insert against the `bot_users` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written
    Inserted,
    /// A row with this chat ID was already present; nothing was written
    AlreadyExists,
}

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Create a new database connection pool
///
/// Initializes a connection pool with up to 10 connections and applies the
/// embedded migrations on the first connection.
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
pub fn create_pool(database_path: &str) -> AppResult<DbPool> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = Pool::builder()
        .max_size(10) // Maximum 10 connections in the pool
        .build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> AppResult<DbConnection> {
    Ok(pool.get()?)
}

/// Checks whether a user with this chat ID has been stored
pub fn user_exists(conn: &Connection, chat_id: i64) -> AppResult<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM bot_users WHERE chat_id = ?1", [chat_id], |row| row.get(0))
        .optional()?;
    Ok(found.is_some())
}

/// Loads a stored user
pub fn get_user(conn: &Connection, chat_id: i64) -> AppResult<Option<BotUser>> {
    let user = conn
        .query_row(
            "SELECT chat_id, username, fullname, longitude, latitude, address FROM bot_users WHERE chat_id = ?1",
            [chat_id],
            |row| {
                Ok(BotUser {
                    chat_id: row.get(0)?,
                    username: row.get(1)?,
                    fullname: row.get(2)?,
                    longitude: row.get(3)?,
                    latitude: row.get(4)?,
                    address: row.get(5)?,
                })
            },
        )
        .optional()?;
    Ok(user)
}

/// Inserts a user; a duplicate chat ID is an error (primary key violation).
pub fn insert_user(conn: &Connection, user: &BotUser) -> AppResult<InsertOutcome> {
    conn.execute(
        "INSERT INTO bot_users (chat_id, username, fullname, longitude, latitude, address)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.chat_id,
            user.username,
            user.fullname,
            user.longitude,
            user.latitude,
            user.address
        ],
    )?;
    Ok(InsertOutcome::Inserted)
}

/// Inserts a user unless one with the same chat ID exists, in one statement.
pub fn insert_user_if_absent(conn: &Connection, user: &BotUser) -> AppResult<InsertOutcome> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO bot_users (chat_id, username, fullname, longitude, latitude, address)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.chat_id,
            user.username,
            user.fullname,
            user.longitude,
            user.latitude,
            user.address
        ],
    )?;

    Ok(if changed == 0 {
        InsertOutcome::AlreadyExists
    } else {
        InsertOutcome::Inserted
    })
}

/// Number of stored users
pub fn count_users(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM bot_users", [], |row| row.get(0))?)
}
