//! Client for the public Aladhan timings API (<https://aladhan.com/prayer-times-api>).

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{parse_hour_minute, Coordinates, PrayerTime, PrayerTimeSource};
use crate::core::{config, AppError, AppResult};

#[derive(Debug, Deserialize)]
struct TimingsResponse {
    data: TimingsData,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: Timings,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Timings {
    fajr: String,
    sunrise: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

impl TryFrom<Timings> for PrayerTime {
    type Error = AppError;

    fn try_from(t: Timings) -> AppResult<Self> {
        Ok(PrayerTime {
            fajr: parse_hour_minute(&t.fajr)?,
            sunrise: parse_hour_minute(&t.sunrise)?,
            dhuhr: parse_hour_minute(&t.dhuhr)?,
            asr: parse_hour_minute(&t.asr)?,
            maghrib: parse_hour_minute(&t.maghrib)?,
            isha: parse_hour_minute(&t.isha)?,
        })
    }
}

/// Fetches daily timings over HTTP; the API resolves the local time zone itself.
#[derive(Debug, Clone)]
pub struct AladhanClient {
    client: Client,
    base_url: Url,
    method: u8,
}

impl AladhanClient {
    pub fn new(client: Client, base_url: Url, method: u8) -> Self {
        Self {
            client,
            base_url,
            method,
        }
    }

    /// Client configured from `ALADHAN_BASE_URL` and `ALADHAN_METHOD`.
    pub fn from_config() -> AppResult<Self> {
        let base_url = Url::parse(&config::prayer::ALADHAN_BASE_URL)
            .map_err(|e| AppError::Config(format!("Invalid ALADHAN_BASE_URL: {}", e)))?;
        let client = Client::builder().timeout(config::network::timeout()).build()?;
        Ok(Self::new(client, base_url, *config::prayer::ALADHAN_METHOD))
    }

    fn timings_url(&self, date: NaiveDate) -> AppResult<Url> {
        self.base_url
            .join(&format!("v1/timings/{}", date.format("%d-%m-%Y")))
            .map_err(|e| AppError::Config(format!("Invalid timings URL: {}", e)))
    }
}

#[async_trait]
impl PrayerTimeSource for AladhanClient {
    async fn fetch(&self, date: NaiveDate, coordinates: Coordinates) -> AppResult<PrayerTime> {
        let coordinates = coordinates.validate()?;
        let url = self.timings_url(date)?;
        log::debug!(
            "Fetching timings for {} at ({}, {})",
            date,
            coordinates.latitude,
            coordinates.longitude
        );

        let response = self
            .client
            .get(url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("method", self.method.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }

        let body: TimingsResponse = response.json().await?;
        body.data.timings.try_into()
    }
}
