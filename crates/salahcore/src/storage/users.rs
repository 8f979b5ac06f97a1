//! User store seam consumed by the bot's `/start` handler.

use std::sync::Arc;

use async_trait::async_trait;

use super::db::{self, BotUser, DbPool, InsertOutcome};
use crate::core::AppResult;

/// Persists chat-identified user profiles.
///
/// `insert_if_absent` is the race-free way to create a user: callers may
/// check `exists` first for the common path, but the write itself must not
/// depend on that check still being true.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists(&self, chat_id: i64) -> AppResult<bool>;

    async fn insert_user(&self, user: &BotUser) -> AppResult<InsertOutcome>;

    async fn insert_if_absent(&self, user: &BotUser) -> AppResult<InsertOutcome>;
}

/// [`UserStore`] backed by the pooled SQLite database.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: Arc<DbPool>,
}

impl SqliteUserStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<DbPool> {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn exists(&self, chat_id: i64) -> AppResult<bool> {
        let conn = db::get_connection(&self.pool)?;
        db::user_exists(&conn, chat_id)
    }

    async fn insert_user(&self, user: &BotUser) -> AppResult<InsertOutcome> {
        let conn = db::get_connection(&self.pool)?;
        db::insert_user(&conn, user)
    }

    async fn insert_if_absent(&self, user: &BotUser) -> AppResult<InsertOutcome> {
        let conn = db::get_connection(&self.pool)?;
        db::insert_user_if_absent(&conn, user)
    }
}
