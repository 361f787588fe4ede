//! # Hijri Compass Application Entry Point
//!
//! Prints today's Gregorian and Hijri dates with the Qibla direction for the
//! configured location, and optionally a dual-calendar month grid, the day's
//! tasks, or nearby mosques. `--json` switches the summary to JSON for scripts.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{bail, Context};
use chrono::{Datelike, Local, NaiveDate};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use hijri_compass_lib::{
    calendar::month_grid,
    config::Config,
    mosque::{rank_nearby, Mosque, NearbyQuery},
    renderer::{draw_month, draw_summary},
    tasks::TaskBook,
    DaySummary,
};

const USAGE: &str = "\
Usage: hijri-compass [OPTIONS]

Options:
  --date YYYY-MM-DD   Show this date instead of today
  --month             Print the dual-calendar month grid
  --config PATH       Read configuration from PATH (default: hijri-compass.toml)
  --tasks PATH        Overlay tasks from a JSON task book
  --mosques PATH      Rank mosques from a JSON list by distance
  --json              Print the summary as JSON
  -h, --help          Show this help";

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub date: Option<NaiveDate>,
    pub month: bool,
    pub config: Option<PathBuf>,
    pub tasks: Option<PathBuf>,
    pub mosques: Option<PathBuf>,
    pub json: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut out = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--month" => out.month = true,
                "--json" => out.json = true,
                "-h" | "--help" => out.help = true,
                "--date" => {
                    let value = args.next().context("--date needs a value")?;
                    let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .with_context(|| format!("invalid --date {value:?}, expected YYYY-MM-DD"))?;
                    out.date = Some(date);
                }
                "--config" => out.config = Some(args.next().context("--config needs a path")?.into()),
                "--tasks" => out.tasks = Some(args.next().context("--tasks needs a path")?.into()),
                "--mosques" => {
                    out.mosques = Some(args.next().context("--mosques needs a path")?.into())
                }
                other => bail!("unknown argument {other:?}\n\n{USAGE}"),
            }
        }
        Ok(out)
    }
}

fn init_logging() {
    let log_env = env::var("HIJRI_COMPASS_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    debug!("log filter: {}", log_env);
}

fn load_mosques(path: &Path) -> anyhow::Result<Vec<Mosque>> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    init_logging();

    let args = CliArgs::parse(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::try_load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load(),
    };

    let today = Local::now().date_naive();
    let date = args.date.unwrap_or(today);
    let summary = DaySummary::compute(date, &config);

    let book = match &args.tasks {
        Some(path) => Some(
            TaskBook::load_from_path(path)
                .with_context(|| format!("loading tasks {}", path.display()))?,
        ),
        None => None,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    draw_summary(&summary);

    if let Some(book) = &book {
        let todays = book.tasks_on(date);
        if !todays.is_empty() {
            println!();
            for task in todays {
                let mark = if task.done { 'x' } else { ' ' };
                println!("[{mark}] {} ({:?})", task.title, task.priority);
            }
        }
    }

    if args.month {
        let grid = month_grid(
            date.year(),
            date.month(),
            today,
            config.calendar.week_starts_monday,
        )
        .context("date has no calendar month")?;
        let tallies = book
            .as_ref()
            .map(|b| b.counts_for_month(date.year(), date.month()))
            .unwrap_or_default();
        println!();
        draw_month(&grid, &tallies);
    }

    if let Some(path) = &args.mosques {
        let mosques = load_mosques(path)?;
        let query = NearbyQuery::new(config.location.point(), config.mosques.search_radius_km);
        let ranked = rank_nearby(&mosques, &query);
        info!(
            candidates = mosques.len(),
            within_radius = ranked.len(),
            "ranked mosques"
        );
        println!();
        if ranked.is_empty() {
            println!(
                "No mosques within {} km of {}",
                config.mosques.search_radius_km, config.location.name
            );
        }
        for r in ranked {
            let badge = if r.closest { "  ← closest" } else { "" };
            println!(
                "{:>8}  {:>6}  {}{}",
                r.distance.to_string(),
                r.bearing.to_string(),
                r.mosque.name,
                badge
            );
        }
    }

    Ok(())
}
