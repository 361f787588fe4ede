//! # Dual Calendar Views
//!
//! Builds the month, week and day views of a Gregorian calendar annotated
//! with approximate Hijri dates and the major Islamic observances.
//!
//! Every cell is derived through [`crate::hijri::to_hijri`], so all three
//! views always agree on which Hijri day a Gregorian date maps to.

use crate::hijri::{to_hijri, HijriDate, HijriMonth};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observances shown on the calendar, keyed by Hijri month and day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IslamicEvent {
    IslamicNewYear,
    Ashura,
    Mawlid,
    IsraMiraj,
    MidShaban,
    RamadanBegins,
    LaylatAlQadr,
    EidAlFitr,
    DayOfArafah,
    EidAlAdha,
}

impl IslamicEvent {
    pub const ALL: [IslamicEvent; 10] = [
        IslamicEvent::IslamicNewYear,
        IslamicEvent::Ashura,
        IslamicEvent::Mawlid,
        IslamicEvent::IsraMiraj,
        IslamicEvent::MidShaban,
        IslamicEvent::RamadanBegins,
        IslamicEvent::LaylatAlQadr,
        IslamicEvent::EidAlFitr,
        IslamicEvent::DayOfArafah,
        IslamicEvent::EidAlAdha,
    ];

    /// Hijri (month, day) the observance falls on.
    pub fn hijri_day(self) -> (HijriMonth, u32) {
        match self {
            IslamicEvent::IslamicNewYear => (HijriMonth::Muharram, 1),
            IslamicEvent::Ashura => (HijriMonth::Muharram, 10),
            IslamicEvent::Mawlid => (HijriMonth::RabiAlAwwal, 12),
            IslamicEvent::IsraMiraj => (HijriMonth::Rajab, 27),
            IslamicEvent::MidShaban => (HijriMonth::Shaban, 15),
            IslamicEvent::RamadanBegins => (HijriMonth::Ramadan, 1),
            IslamicEvent::LaylatAlQadr => (HijriMonth::Ramadan, 27),
            IslamicEvent::EidAlFitr => (HijriMonth::Shawwal, 1),
            IslamicEvent::DayOfArafah => (HijriMonth::DhuAlHijjah, 9),
            IslamicEvent::EidAlAdha => (HijriMonth::DhuAlHijjah, 10),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IslamicEvent::IslamicNewYear => "Islamic New Year",
            IslamicEvent::Ashura => "Ashura",
            IslamicEvent::Mawlid => "Mawlid an-Nabi",
            IslamicEvent::IsraMiraj => "Isra and Mi'raj",
            IslamicEvent::MidShaban => "Mid-Sha'ban",
            IslamicEvent::RamadanBegins => "Start of Ramadan",
            IslamicEvent::LaylatAlQadr => "Laylat al-Qadr",
            IslamicEvent::EidAlFitr => "Eid al-Fitr",
            IslamicEvent::DayOfArafah => "Day of Arafah",
            IslamicEvent::EidAlAdha => "Eid al-Adha",
        }
    }
}

impl fmt::Display for IslamicEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Observances falling on `hijri`.
pub fn events_on(hijri: HijriDate) -> Vec<IslamicEvent> {
    IslamicEvent::ALL
        .iter()
        .copied()
        .filter(|e| {
            let (month, day) = e.hijri_day();
            month.number() == hijri.month && day == hijri.day
        })
        .collect()
}

/// One day on the calendar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub hijri: HijriDate,
    pub is_today: bool,
    pub events: Vec<IslamicEvent>,
}

/// The view for a single date.
pub fn day_view(date: NaiveDate, today: NaiveDate) -> DayCell {
    let hijri = to_hijri(date);
    DayCell {
        date,
        hijri,
        is_today: date == today,
        events: events_on(hijri),
    }
}

fn week_start(week_starts_monday: bool) -> Weekday {
    if week_starts_monday {
        Weekday::Mon
    } else {
        Weekday::Sun
    }
}

/// Column (0–6) of `date` in a week starting on Monday or Sunday.
fn column_of(date: NaiveDate, week_starts_monday: bool) -> u32 {
    if week_starts_monday {
        date.weekday().num_days_from_monday()
    } else {
        date.weekday().num_days_from_sunday()
    }
}

/// The seven days of the week containing `date`.
/// `None` if the week runs past the range chrono can represent.
pub fn week_of(
    date: NaiveDate,
    today: NaiveDate,
    week_starts_monday: bool,
) -> Option<[DayCell; 7]> {
    let first =
        date.checked_sub_signed(Duration::days(column_of(date, week_starts_monday) as i64))?;
    let cells = (0..7)
        .map(|i| {
            first
                .checked_add_signed(Duration::days(i))
                .map(|day| day_view(day, today))
        })
        .collect::<Option<Vec<DayCell>>>()?;
    cells.try_into().ok()
}

/// A Gregorian month laid out in weeks. Cells outside the month are `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub week_starts_on: Weekday,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthGrid {
    /// All in-month cells in date order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|w| w.iter().flatten())
    }

    /// Hijri months the grid spans, e.g. Sha'ban–Ramadan 1445.
    pub fn hijri_span(&self) -> Option<(HijriDate, HijriDate)> {
        let first = self.days().next()?.hijri;
        let last = self.days().last()?.hijri;
        Some((first, last))
    }
}

/// Lay out `year`-`month` for display. `None` if the month doesn't exist.
pub fn month_grid(
    year: i32,
    month: u32,
    today: NaiveDate,
    week_starts_monday: bool,
) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = column_of(first, week_starts_monday) as usize;

    let mut weeks = Vec::with_capacity(6);
    let mut week: [Option<DayCell>; 7] = Default::default();
    let mut col = lead;

    let mut date = first;
    while date.month() == month {
        week[col] = Some(day_view(date, today));
        col += 1;
        if col == 7 {
            weeks.push(std::mem::take(&mut week));
            col = 0;
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    if col != 0 {
        weeks.push(week);
    }

    Some(MonthGrid {
        year,
        month,
        week_starts_on: week_start(week_starts_monday),
        weeks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn march_2024_sunday_start() {
        let today = ymd(2024, 3, 11);
        let grid = month_grid(2024, 3, today, false).unwrap();

        // 1 March 2024 is a Friday.
        assert!(grid.weeks[0][..5].iter().all(Option::is_none));
        assert_eq!(grid.weeks[0][5].as_ref().unwrap().date, ymd(2024, 3, 1));
        assert_eq!(grid.days().count(), 31);
        assert_eq!(grid.weeks.len(), 6);

        let todays: Vec<_> = grid.days().filter(|c| c.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, today);
    }

    #[test]
    fn monday_start_shifts_columns() {
        let grid = month_grid(2024, 3, ymd(2000, 1, 1), true).unwrap();
        assert_eq!(grid.week_starts_on, Weekday::Mon);
        assert_eq!(grid.weeks[0][4].as_ref().unwrap().date, ymd(2024, 3, 1));
        assert_eq!(grid.weeks.len(), 5);
    }

    #[test]
    fn february_leap_year() {
        let grid = month_grid(2024, 2, ymd(2024, 2, 1), false).unwrap();
        assert_eq!(grid.days().count(), 29);
        let last = grid.days().last().unwrap();
        assert_eq!(last.date, ymd(2024, 2, 29));
    }

    #[test]
    fn invalid_month_is_none() {
        assert!(month_grid(2024, 13, ymd(2024, 1, 1), false).is_none());
        assert!(month_grid(2024, 0, ymd(2024, 1, 1), false).is_none());
    }

    #[test]
    fn grid_cells_match_direct_conversion() {
        let grid = month_grid(2025, 6, ymd(2025, 6, 1), false).unwrap();
        for cell in grid.days() {
            assert_eq!(cell.hijri, to_hijri(cell.date));
        }
    }

    #[test]
    fn week_contains_date_and_starts_on_configured_day() {
        let date = ymd(2024, 3, 13); // Wednesday
        let week = week_of(date, date, false).unwrap();
        assert_eq!(week[0].date.weekday(), Weekday::Sun);
        assert_eq!(week[3].date, date);
        assert!(week[3].is_today);

        let week = week_of(date, date, true).unwrap();
        assert_eq!(week[0].date.weekday(), Weekday::Mon);
        assert_eq!(week[2].date, date);
    }

    #[test]
    fn week_at_the_ends_of_the_calendar_is_none() {
        let today = ymd(2024, 3, 11);
        // Both weeks would reach past what chrono can represent.
        assert!(week_of(NaiveDate::MAX, today, false).is_none());
        assert!(week_of(NaiveDate::MIN, today, true).is_none());

        // A week safely inside the range still resolves.
        let inside = NaiveDate::MAX - Duration::days(14);
        let week = week_of(inside, today, false).unwrap();
        assert!(week.iter().any(|c| c.date == inside));
    }

    #[test]
    fn ramadan_start_is_flagged() {
        let cell = events_on(HijriDate { year: 1445, month: 9, day: 1 });
        assert_eq!(cell, vec![IslamicEvent::RamadanBegins]);
        assert!(events_on(HijriDate { year: 1445, month: 9, day: 2 }).is_empty());
    }

    #[test]
    fn a_hijri_year_shows_every_event_once() {
        // Walk one full approximate Hijri year and count observances.
        let mut date = ymd(2024, 7, 6); // 1 Muharram 1446 by the approximation
        let mut seen = Vec::new();
        while to_hijri(date).year == 1446 {
            seen.extend(day_view(date, date).events);
            date = date.succ_opt().unwrap();
        }
        for event in IslamicEvent::ALL {
            assert_eq!(
                seen.iter().filter(|e| **e == event).count(),
                1,
                "{event} should appear once"
            );
        }
    }
}
