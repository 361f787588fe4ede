//! # Command Line Parsing Tests

use crate::CliArgs;
use chrono::NaiveDate;
use std::path::PathBuf;

fn parse(args: &[&str]) -> anyhow::Result<CliArgs> {
    CliArgs::parse(args.iter().map(|s| s.to_string()))
}

#[test]
fn no_arguments_means_today_summary() {
    let args = parse(&[]).unwrap();
    assert_eq!(args, CliArgs::default());
}

#[test]
fn all_flags_parse() {
    let args = parse(&[
        "--date",
        "2024-03-11",
        "--month",
        "--config",
        "/etc/hc.toml",
        "--tasks",
        "tasks.json",
        "--mosques",
        "mosques.json",
        "--json",
    ])
    .unwrap();

    assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 3, 11));
    assert!(args.month);
    assert!(args.json);
    assert_eq!(args.config, Some(PathBuf::from("/etc/hc.toml")));
    assert_eq!(args.tasks, Some(PathBuf::from("tasks.json")));
    assert_eq!(args.mosques, Some(PathBuf::from("mosques.json")));
}

#[test]
fn bad_date_is_rejected() {
    let err = parse(&["--date", "11/03/2024"]).unwrap_err();
    assert!(err.to_string().contains("YYYY-MM-DD"), "{err}");
}

#[test]
fn missing_value_is_rejected() {
    assert!(parse(&["--config"]).is_err());
    assert!(parse(&["--date"]).is_err());
}

#[test]
fn unknown_flag_is_rejected() {
    let err = parse(&["--stdout"]).unwrap_err();
    assert!(err.to_string().contains("--stdout"));
}

#[test]
fn help_flag() {
    assert!(parse(&["-h"]).unwrap().help);
    assert!(parse(&["--help"]).unwrap().help);
}
