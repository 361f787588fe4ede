//! # Approximate Hijri Calendar
//!
//! Linear Gregorian → Hijri conversion for display purposes.
//!
//! The Islamic calendar is lunar: each month starts with the sighting of the
//! crescent, so months are 29 or 30 days and the exact start varies by region.
//! This module does **not** model any of that. It counts days from a fixed
//! epoch and divides by average lengths:
//!
//! - **Epoch**: 16 July 622 (proleptic Gregorian), 1 Muharram 1 AH
//! - **Year**: 354.367 days (mean of the 30-year tabular cycle)
//! - **Month**: 29.5 days
//!
//! Accuracy is ±1–2 days against an observed calendar, which is fine for a
//! calendar badge and wrong for religious rulings.
//!
//! ## Degenerate input
//! Dates before the epoch are not rejected. They produce a year of 0 or less
//! and month/day clamped to 1. Callers that care should check
//! [`days_since_epoch`] first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1 Muharram 1 AH in the proleptic Gregorian calendar.
pub const HIJRI_EPOCH: (i32, u32, u32) = (622, 7, 16);

/// Mean Hijri year length in days.
pub const MEAN_YEAR_DAYS: f64 = 354.367;

/// Mean Hijri month length in days.
pub const MEAN_MONTH_DAYS: f64 = 29.5;

/// Approximate Hijri date. `year` is signed so pre-epoch input stays representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HijriDate {
    pub year: i32,
    /// 1 = Muharram … 12 = Dhu al-Hijjah
    pub month: u32,
    /// 1 – 30
    pub day: u32,
}

impl HijriDate {
    pub fn month_name(&self) -> &'static str {
        HijriMonth::from_number(self.month)
            .map(HijriMonth::name)
            .unwrap_or("Unknown")
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name(), self.year)
    }
}

/// The twelve Hijri months in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HijriMonth {
    Muharram = 1,
    Safar,
    RabiAlAwwal,
    RabiAlThani,
    JumadaAlUla,
    JumadaAlAkhirah,
    Rajab,
    Shaban,
    Ramadan,
    Shawwal,
    DhuAlQadah,
    DhuAlHijjah,
}

impl HijriMonth {
    pub const ALL: [HijriMonth; 12] = [
        HijriMonth::Muharram,
        HijriMonth::Safar,
        HijriMonth::RabiAlAwwal,
        HijriMonth::RabiAlThani,
        HijriMonth::JumadaAlUla,
        HijriMonth::JumadaAlAkhirah,
        HijriMonth::Rajab,
        HijriMonth::Shaban,
        HijriMonth::Ramadan,
        HijriMonth::Shawwal,
        HijriMonth::DhuAlQadah,
        HijriMonth::DhuAlHijjah,
    ];

    /// Month for a 1-based number, `None` outside 1–12.
    pub fn from_number(n: u32) -> Option<Self> {
        Self::ALL.get(n.checked_sub(1)? as usize).copied()
    }

    pub fn number(self) -> u32 {
        self as u32
    }

    /// Transliterated English name.
    pub fn name(self) -> &'static str {
        match self {
            HijriMonth::Muharram => "Muharram",
            HijriMonth::Safar => "Safar",
            HijriMonth::RabiAlAwwal => "Rabi al-Awwal",
            HijriMonth::RabiAlThani => "Rabi al-Thani",
            HijriMonth::JumadaAlUla => "Jumada al-Ula",
            HijriMonth::JumadaAlAkhirah => "Jumada al-Akhirah",
            HijriMonth::Rajab => "Rajab",
            HijriMonth::Shaban => "Sha'ban",
            HijriMonth::Ramadan => "Ramadan",
            HijriMonth::Shawwal => "Shawwal",
            HijriMonth::DhuAlQadah => "Dhu al-Qa'dah",
            HijriMonth::DhuAlHijjah => "Dhu al-Hijjah",
        }
    }
}

fn epoch() -> NaiveDate {
    let (y, m, d) = HIJRI_EPOCH;
    // Constant date, always valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// Whole days between the Hijri epoch and `date`. Negative before the epoch.
pub fn days_since_epoch(date: NaiveDate) -> i64 {
    date.signed_duration_since(epoch()).num_days()
}

/// Convert a Gregorian date to its approximate Hijri equivalent.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use hijri_compass_lib::hijri::to_hijri;
///
/// let h = to_hijri(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
/// assert_eq!((h.year, h.month), (1445, 9)); // Ramadan 1445
/// ```
pub fn to_hijri(date: NaiveDate) -> HijriDate {
    let days = days_since_epoch(date) as f64;

    let year = (days / MEAN_YEAR_DAYS).floor() as i32 + 1;

    // `%` on f64 truncates toward zero, so the remainder keeps the sign of
    // `days` and pre-epoch dates fall through to the clamps below.
    let day_of_year = days % MEAN_YEAR_DAYS;
    let month = ((day_of_year / MEAN_MONTH_DAYS).floor() as i64 + 1).clamp(1, 12) as u32;
    let day = ((day_of_year % MEAN_MONTH_DAYS).floor() as i64 + 1).clamp(1, 30) as u32;

    HijriDate { year, month, day }
}
