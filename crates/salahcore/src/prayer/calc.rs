//! Offline prayer-time calculation from the sun's position.
//!
//! Uses the low-precision solar coordinates from the Astronomical Almanac
//! (good to about a minute between 1950 and 2050) and the Muslim World League
//! twilight angles by default.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, NaiveTime};

use super::{Coordinates, PrayerTime, PrayerTimeSource};
use crate::core::{AppError, AppResult};

/// Twilight angles and Asr shadow factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationParams {
    /// Sun depression below the horizon at Fajr, in degrees
    pub fajr_angle: f64,
    /// Sun depression below the horizon at Isha, in degrees
    pub isha_angle: f64,
    /// Shadow length factor at Asr (1 = Shafi'i, 2 = Hanafi)
    pub asr_factor: f64,
}

/// Apparent sun depression at sunrise/sunset (refraction + semi-diameter)
const RISE_SET_ANGLE: f64 = 0.833;

impl CalculationParams {
    pub const MUSLIM_WORLD_LEAGUE: Self = Self {
        fajr_angle: 18.0,
        isha_angle: 17.0,
        asr_factor: 1.0,
    };
}

impl Default for CalculationParams {
    fn default() -> Self {
        Self::MUSLIM_WORLD_LEAGUE
    }
}

/// [`PrayerTimeSource`] that needs no network.
///
/// Times are shifted to the whole-hour offset approximated from the longitude
/// because a location message carries no time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstronomicalCalculator {
    pub params: CalculationParams,
}

impl AstronomicalCalculator {
    pub fn new(params: CalculationParams) -> Self {
        Self { params }
    }

    /// Computes the schedule in the coordinates' approximate local time.
    pub fn compute(&self, date: NaiveDate, coordinates: Coordinates) -> AppResult<PrayerTime> {
        let coordinates = coordinates.validate()?;
        self.compute_with_offset(date, coordinates, f64::from(coordinates.approximate_utc_offset_hours()))
    }

    /// Computes the schedule for an explicit UTC offset in hours.
    pub fn compute_with_offset(
        &self,
        date: NaiveDate,
        coordinates: Coordinates,
        utc_offset_hours: f64,
    ) -> AppResult<PrayerTime> {
        let day = SolarDay::new(date, coordinates);
        let p = self.params;

        // Initial guesses as day fractions; one refinement pass is enough at minute precision.
        let fajr = day.sun_angle_time(p.fajr_angle, 5.0 / 24.0, Direction::BeforeNoon)?;
        let sunrise = day.sun_angle_time(RISE_SET_ANGLE, 6.0 / 24.0, Direction::BeforeNoon)?;
        let dhuhr = day.mid_day(12.0 / 24.0);
        let asr = day.asr_time(p.asr_factor, 13.0 / 24.0)?;
        let maghrib = day.sun_angle_time(RISE_SET_ANGLE, 18.0 / 24.0, Direction::AfterNoon)?;
        let isha = day.sun_angle_time(p.isha_angle, 18.0 / 24.0, Direction::AfterNoon)?;

        let shift = utc_offset_hours - coordinates.longitude / 15.0;
        Ok(PrayerTime {
            fajr: to_time(fajr + shift),
            sunrise: to_time(sunrise + shift),
            dhuhr: to_time(dhuhr + shift),
            asr: to_time(asr + shift),
            maghrib: to_time(maghrib + shift),
            isha: to_time(isha + shift),
        })
    }
}

#[async_trait]
impl PrayerTimeSource for AstronomicalCalculator {
    async fn fetch(&self, date: NaiveDate, coordinates: Coordinates) -> AppResult<PrayerTime> {
        self.compute(date, coordinates)
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    BeforeNoon,
    AfterNoon,
}

struct SolarPosition {
    declination: f64,
    equation_of_time: f64,
}

/// Julian date and latitude for one day's computation
struct SolarDay {
    julian_date: f64,
    latitude: f64,
}

impl SolarDay {
    fn new(date: NaiveDate, coordinates: Coordinates) -> Self {
        Self {
            julian_date: julian_date(date) - coordinates.longitude / (15.0 * 24.0),
            latitude: coordinates.latitude,
        }
    }

    fn sun_position(&self, day_fraction: f64) -> SolarPosition {
        let d = self.julian_date + day_fraction - 2_451_545.0;
        let g = fix_angle(357.529 + 0.985_600_28 * d);
        let q = fix_angle(280.459 + 0.985_647_36 * d);
        let l = fix_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2.0 * g));
        let e = 23.439 - 0.000_000_36 * d;

        let right_ascension = fix_hour(darctan2(dcos(e) * dsin(l), dcos(l)) / 15.0);
        SolarPosition {
            declination: darcsin(dsin(e) * dsin(l)),
            equation_of_time: q / 15.0 - right_ascension,
        }
    }

    /// Solar noon in hours (UTC at longitude 0 before the final shift)
    fn mid_day(&self, day_fraction: f64) -> f64 {
        fix_hour(12.0 - self.sun_position(day_fraction).equation_of_time)
    }

    fn sun_angle_time(&self, angle: f64, day_fraction: f64, direction: Direction) -> AppResult<f64> {
        let declination = self.sun_position(day_fraction).declination;
        let noon = self.mid_day(day_fraction);
        let cos_hour_angle = (-dsin(angle) - dsin(declination) * dsin(self.latitude))
            / (dcos(declination) * dcos(self.latitude));

        if !(-1.0..=1.0).contains(&cos_hour_angle) {
            return Err(AppError::Calculation(format!(
                "sun does not reach {}° below the horizon at latitude {}",
                angle, self.latitude
            )));
        }

        let t = darccos(cos_hour_angle) / 15.0;
        Ok(match direction {
            Direction::BeforeNoon => noon - t,
            Direction::AfterNoon => noon + t,
        })
    }

    fn asr_time(&self, factor: f64, day_fraction: f64) -> AppResult<f64> {
        let declination = self.sun_position(day_fraction).declination;
        let angle = -darccot(factor + dtan((self.latitude - declination).abs()));
        self.sun_angle_time(angle, day_fraction, Direction::AfterNoon)
    }
}

/// Julian date at 0h UT of the given civil date
fn julian_date(date: NaiveDate) -> f64 {
    let (mut year, mut month) = (date.year(), date.month() as i32);
    if month <= 2 {
        year -= 1;
        month += 12;
    }
    let a = (f64::from(year) / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * f64::from(year + 4716)).floor() + (30.6001 * f64::from(month + 1)).floor() + f64::from(date.day()) + b
        - 1524.5
}

/// Rounds fractional hours to the nearest minute, wrapping around midnight.
fn to_time(hours: f64) -> NaiveTime {
    let minutes = (fix_hour(hours) * 60.0).round() as u32 % (24 * 60);
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}

fn fix_angle(a: f64) -> f64 {
    a.rem_euclid(360.0)
}

fn fix_hour(h: f64) -> f64 {
    h.rem_euclid(24.0)
}

fn dsin(d: f64) -> f64 {
    d.to_radians().sin()
}

fn dcos(d: f64) -> f64 {
    d.to_radians().cos()
}

fn dtan(d: f64) -> f64 {
    d.to_radians().tan()
}

fn darcsin(x: f64) -> f64 {
    x.asin().to_degrees()
}

fn darccos(x: f64) -> f64 {
    x.acos().to_degrees()
}

fn darctan2(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

fn darccot(x: f64) -> f64 {
    (1.0 / x).atan().to_degrees()
}
