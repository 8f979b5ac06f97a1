//! Prayer-time model, schedule sources and the per-chat cache

pub mod aladhan;
pub mod cache;
pub mod calc;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::core::{config, AppError, AppResult};

pub use aladhan::AladhanClient;
pub use cache::{PrayerTimeCache, PrayerTimeLookup};
pub use calc::AstronomicalCalculator;

/// A point on the map, as shared by a Telegram location message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    /// Rejects NaN and out-of-range values.
    pub fn validate(self) -> AppResult<Self> {
        if !(-180.0..=180.0).contains(&self.longitude) || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(AppError::Validation(format!(
                "coordinates out of range: longitude={}, latitude={}",
                self.longitude, self.latitude
            )));
        }
        Ok(self)
    }

    /// Whole-hour UTC offset approximated from the longitude.
    pub fn approximate_utc_offset_hours(self) -> i32 {
        (self.longitude / 15.0).round() as i32
    }

    /// Today's date at the approximate local offset of these coordinates.
    pub fn local_date(self) -> NaiveDate {
        let now = Utc::now();
        match FixedOffset::east_opt(self.approximate_utc_offset_hours() * 3600) {
            Some(offset) => now.with_timezone(&offset).date_naive(),
            None => now.date_naive(),
        }
    }
}

/// One day's schedule of the six daily times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerTime {
    pub fajr: NaiveTime,
    pub sunrise: NaiveTime,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
}

/// Icon shown next to a prayer on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Daylight {
    Moon,
    Sun,
}

impl Daylight {
    pub fn emoji(self) -> &'static str {
        match self {
            Daylight::Moon => "🌙",
            Daylight::Sun => "🔆",
        }
    }
}

impl PrayerTime {
    /// `(label, icon, time)` in schedule order.
    pub fn entries(&self) -> [(&'static str, Daylight, NaiveTime); 6] {
        [
            ("Fajr", Daylight::Moon, self.fajr),
            ("Sunrise", Daylight::Sun, self.sunrise),
            ("Dhuhr", Daylight::Sun, self.dhuhr),
            ("Asr", Daylight::Sun, self.asr),
            ("Maghrib", Daylight::Moon, self.maghrib),
            ("Isha", Daylight::Moon, self.isha),
        ]
    }

    pub fn is_ordered(&self) -> bool {
        self.entries().windows(2).all(|pair| pair[0].2 < pair[1].2)
    }
}

/// Time-of-day value formatted as `HH:MM`.
pub struct HourMinute(pub NaiveTime);

impl fmt::Display for HourMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Parses `HH:MM`, ignoring anything after the first whitespace (`"05:00 (EET)"`).
pub fn parse_hour_minute(raw: &str) -> AppResult<NaiveTime> {
    let token = raw.split_whitespace().next().unwrap_or_default();
    NaiveTime::parse_from_str(token, "%H:%M")
        .map_err(|e| AppError::Validation(format!("invalid time '{}': {}", raw, e)))
}

/// Computes the schedule for a date and place.
#[async_trait]
pub trait PrayerTimeSource: Send + Sync {
    async fn fetch(&self, date: NaiveDate, coordinates: Coordinates) -> AppResult<PrayerTime>;
}

/// Builds the source named by `PRAYER_SOURCE`.
pub fn source_from_config() -> AppResult<Arc<dyn PrayerTimeSource>> {
    match config::prayer::SOURCE.to_ascii_lowercase().as_str() {
        "aladhan" => Ok(Arc::new(AladhanClient::from_config()?)),
        "local" => Ok(Arc::new(AstronomicalCalculator::default())),
        other => Err(AppError::Config(format!(
            "unknown PRAYER_SOURCE '{}', expected 'aladhan' or 'local'",
            other
        ))),
    }
}

#[cfg(test)]
pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}
