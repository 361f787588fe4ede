//! # Hijri Compass Core Library
//!
//! Pure computations behind an Islamic calendar and Qibla compass, pulled
//! into one tested place.
//!
//! ## Design Philosophy
//!
//! ### Total functions
//! The core conversions never fail and never panic. [`hijri::to_hijri`]
//! returns a date for any input, and [`geo::bearing`] / [`geo::distance`]
//! return a number for any pair of points. Validation is opt-in at the
//! edges ([`geo::GeoPoint::try_new`], [`config::Config::try_load_from_path`]).
//!
//! ### Approximation, not astronomy
//! - **Hijri dates** come from a linear day count (354.367-day years,
//!   29.5-day months) and drift ±1–2 days from the sighted calendar
//! - **Distances** use a spherical Earth (R = 6371 km), within ~0.5 % of WGS-84
//!
//! ### One source of truth
//! Month, week and day views all derive their Hijri dates from the same
//! function, so a date shows the same Hijri day everywhere.
//!
//! ## Modules
//! - [`hijri`]: Gregorian → Hijri approximation and month names
//! - [`geo`]: great-circle bearing and Haversine distance
//! - [`qibla`]: direction to the Kaaba and compass helpers
//! - [`calendar`]: month/week/day views with Islamic observances
//! - [`tasks`]: per-date task list with JSON persistence
//! - [`mosque`]: nearby mosque filtering and ranking
//! - [`config`]: TOML configuration
//! - [`renderer`]: terminal output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Module declarations
pub mod calendar;
pub mod config;
pub mod geo;
pub mod hijri;
pub mod mosque;
pub mod qibla;
pub mod renderer;
pub mod tasks;

use calendar::IslamicEvent;
use config::Config;
use hijri::HijriDate;
use qibla::QiblaReading;

/// Everything the home screen shows for one date and location.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use hijri_compass_lib::{config::Config, DaySummary};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// let summary = DaySummary::compute(date, &Config::default());
///
/// assert_eq!(summary.hijri.month, 9); // Ramadan
/// assert_eq!(summary.qibla.distance.kilometers, 0.0); // default location is Makkah
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub hijri: HijriDate,
    pub events: Vec<IslamicEvent>,
    pub location_name: String,
    pub qibla: QiblaReading,
}

impl DaySummary {
    pub fn compute(date: NaiveDate, config: &Config) -> Self {
        let hijri = hijri::to_hijri(date);
        DaySummary {
            date,
            hijri,
            events: calendar::events_on(hijri),
            location_name: config.location.name.clone(),
            qibla: qibla::qibla(config.location.point()),
        }
    }
}
