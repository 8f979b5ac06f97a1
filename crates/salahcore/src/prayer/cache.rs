use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use moka::future::Cache;

use super::{Coordinates, PrayerTime, PrayerTimeSource};
use crate::core::{config, AppError, AppResult};

/// Looks up the schedule a chat asked for, computing it only on a miss.
#[async_trait]
pub trait PrayerTimeLookup: Send + Sync {
    async fn get_or_update(&self, chat_id: i64, longitude: f64, latitude: f64) -> AppResult<PrayerTime>;
}

/// Floats are keyed by their bit pattern so identical shared locations hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    chat_id: i64,
    longitude: u64,
    latitude: u64,
    date: NaiveDate,
}

/// Schedule cache in front of a [`PrayerTimeSource`].
///
/// Entries are keyed by chat, coordinates and the local date, so a new day
/// is a new key; the TTL only bounds memory.
pub struct PrayerTimeCache {
    cache: Cache<CacheKey, PrayerTime>,
    source: Arc<dyn PrayerTimeSource>,
}

impl PrayerTimeCache {
    pub fn new(source: Arc<dyn PrayerTimeSource>, max_entries: u64, ttl: Duration) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).time_to_live(ttl).build(),
            source,
        }
    }

    /// Cache sized and aged from `config::cache`.
    pub fn from_config(source: Arc<dyn PrayerTimeSource>) -> Self {
        Self::new(source, config::cache::MAX_ENTRIES, config::cache::ttl())
    }

    /// Lookup for an explicit date; concurrent misses for one key compute once.
    pub async fn get_or_update_on(
        &self,
        chat_id: i64,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> AppResult<PrayerTime> {
        let key = CacheKey {
            chat_id,
            longitude: coordinates.longitude.to_bits(),
            latitude: coordinates.latitude.to_bits(),
            date,
        };
        let source = Arc::clone(&self.source);

        self.cache
            .try_get_with(key, async move {
                log::debug!("Prayer time cache miss for chat {} on {}", chat_id, date);
                source.fetch(date, coordinates).await
            })
            .await
            .map_err(AppError::Lookup)
    }
}

#[async_trait]
impl PrayerTimeLookup for PrayerTimeCache {
    async fn get_or_update(&self, chat_id: i64, longitude: f64, latitude: f64) -> AppResult<PrayerTime> {
        let coordinates = Coordinates::new(longitude, latitude).validate()?;
        self.get_or_update_on(chat_id, coordinates, coordinates.local_date()).await
    }
}
