//! # Text Rendering
//!
//! Plain-text output for the terminal: the dual-calendar month grid and the
//! daily summary. Rendering returns `String`s so the layout can be tested;
//! the `draw_*` wrappers print them.
//!
//! ## Month grid cell layout
//! Each cell is eight columns wide: the Gregorian day, the Hijri day, and
//! two marker slots.
//!
//! ```text
//! 11  1*!
//! │   │ │└ '!' an Islamic observance, or the number of open tasks (1–9, '+')
//! │   │ └─ '*' today
//! │   └─── Hijri day
//! └─────── Gregorian day
//! ```

use crate::calendar::{DayCell, MonthGrid};
use crate::tasks::DayTally;
use crate::DaySummary;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;
use std::fmt::Write as _;

const CELL_WIDTH: usize = 8;

const GREGORIAN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn weekday_header(starts_on: Weekday) -> String {
    let mut day = starts_on;
    let mut out = String::new();
    for _ in 0..7 {
        let name = match day {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        };
        let _ = write!(out, "{:<width$}", name, width = CELL_WIDTH);
        day = day.succ();
    }
    out.trim_end().to_string()
}

fn marker(cell: &DayCell, tally: Option<&DayTally>) -> char {
    if !cell.events.is_empty() {
        return '!';
    }
    match tally.map(DayTally::pending).unwrap_or(0) {
        0 => ' ',
        n @ 1..=9 => char::from_digit(n as u32, 10).unwrap_or('+'),
        _ => '+',
    }
}

fn render_cell(cell: &DayCell, tally: Option<&DayTally>) -> String {
    format!(
        "{:>2} {:>2}{}{} ",
        cell.date.day(),
        cell.hijri.day,
        if cell.is_today { '*' } else { ' ' },
        marker(cell, tally)
    )
}

/// Render `grid` with task tallies overlaid.
pub fn render_month(grid: &MonthGrid, tallies: &BTreeMap<NaiveDate, DayTally>) -> String {
    let mut out = String::new();

    let month_name = grid
        .month
        .checked_sub(1)
        .and_then(|i| GREGORIAN_MONTHS.get(i as usize))
        .copied()
        .unwrap_or("?");
    let _ = write!(out, "{} {}", month_name, grid.year);
    if let Some((first, last)) = grid.hijri_span() {
        if first.month == last.month && first.year == last.year {
            let _ = write!(out, " · {} {} AH", first.month_name(), first.year);
        } else {
            let _ = write!(
                out,
                " · {} {} – {} {} AH",
                first.month_name(),
                first.year,
                last.month_name(),
                last.year
            );
        }
    }
    out.push('\n');
    out.push_str(&weekday_header(grid.week_starts_on));
    out.push('\n');

    for week in &grid.weeks {
        let mut line = String::new();
        for slot in week {
            match slot {
                Some(cell) => line.push_str(&render_cell(cell, tallies.get(&cell.date))),
                None => line.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let events: Vec<String> = grid
        .days()
        .flat_map(|c| c.events.iter().map(move |e| format!("{:>2}  {}", c.date.day(), e)))
        .collect();
    if !events.is_empty() {
        out.push('\n');
        for line in events {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Render the one-screen daily summary.
pub fn render_summary(summary: &DaySummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", summary.date.format("%A, %-d %B %Y"));
    let _ = writeln!(out, "{}", summary.hijri);
    for event in &summary.events {
        let _ = writeln!(out, "  ★ {event}");
    }
    let _ = writeln!(
        out,
        "Qibla from {}: {} {} ({} to the Kaaba)",
        summary.location_name,
        summary.qibla.bearing,
        summary.qibla.compass,
        summary.qibla.distance
    );
    out
}

pub fn draw_month(grid: &MonthGrid, tallies: &BTreeMap<NaiveDate, DayTally>) {
    print!("{}", render_month(grid, tallies));
}

pub fn draw_summary(summary: &DaySummary) {
    print!("{}", render_summary(summary));
}
