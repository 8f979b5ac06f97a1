//! salahcore - storage, prayer-time computation and card rendering for salahbot
//!
//! # Module Structure
//!
//! - `core`: configuration, errors and logging
//! - `storage`: SQLite user store
//! - `prayer`: prayer-time model, sources and cache
//! - `render`: PNG card rendering

pub mod core;
pub mod prayer;
pub mod render;
pub mod storage;

// Re-export commonly used types for convenience
pub use core::{config, init_logger, AppError, AppResult};
pub use prayer::{Coordinates, PrayerTime, PrayerTimeCache, PrayerTimeLookup, PrayerTimeSource};
pub use render::{format_schedule, CardRenderer, FontChain, PrayerCardRenderer};
pub use storage::{create_pool, get_connection, BotUser, DbConnection, DbPool, InsertOutcome, SqliteUserStore, UserStore};
