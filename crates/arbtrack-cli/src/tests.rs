//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use arbtrack_core::config::EngineConfig;
use arbtrack_core::db::Database;
use arbtrack_core::test_utils::{date, history_from_profits};
use arbtrack_core::RecordStore;
use clap::Parser;

use crate::cli::Cli;
use crate::commands::{self, DayEntry};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

/// Seed `profits` as consecutive days ending on `last`
fn seed_history(db: &Database, user: &str, last: chrono::NaiveDate, profits: &[f64]) {
    let start = last - chrono::Duration::days(profits.len() as i64 - 1);
    for (d, record) in history_from_profits(start, profits).iter() {
        db.upsert(user, *d, record).unwrap();
    }
}

fn entry(geo: &str, deposits: u32, spend: f64) -> DayEntry {
    DayEntry {
        geo: geo.to_string(),
        deposits,
        spend,
        extra: 0.0,
    }
}

// ========== Utility Tests ==========

#[test]
fn test_parse_date() {
    let today = date(2024, 5, 1);
    assert_eq!(commands::parse_date(None, today).unwrap(), today);
    assert_eq!(
        commands::parse_date(Some("2024-02-29"), today).unwrap(),
        date(2024, 2, 29)
    );
    assert!(commands::parse_date(Some("29.02.2024"), today).is_err());
}

#[test]
fn test_resolve_geo() {
    let config = EngineConfig::default();
    assert_eq!(commands::resolve_geo(&config, "PHIL").unwrap().rate, 20.0);
    assert_eq!(commands::resolve_geo(&config, "moro").unwrap().name, "Morocco");

    let err = commands::resolve_geo(&config, "brazil").unwrap_err();
    assert!(err.to_string().contains("philippines"));
}

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[economics]\nfixed_expenses = 7.5\n").unwrap();

    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.fixed_expenses, 7.5);
    assert_eq!(config.geos, EngineConfig::default().geos);
}

#[test]
fn test_load_config_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[economics]\nmy_share_fraction = 1.5\n").unwrap();

    assert!(commands::load_config(Some(&path)).is_err());
}

// ========== Entry Command Tests ==========

#[test]
fn test_cmd_add_stores_record() {
    let db = setup_test_db();
    let config = EngineConfig::default();

    commands::cmd_add(&db, &config, "me", &entry("india", 8, 120.0), date(2024, 3, 1)).unwrap();

    let record = db.get_daily_record("me", date(2024, 3, 1)).unwrap().unwrap();
    assert_eq!(record.geo, "India");
    assert_eq!(record.revenue, 320.0);
    // (320 - 124) * 0.5
    assert_eq!(record.net_profit, 98.0);
}

#[test]
fn test_cmd_add_overwrites_same_day() {
    let db = setup_test_db();
    let config = EngineConfig::default();

    commands::cmd_add(&db, &config, "me", &entry("phil", 5, 100.0), date(2024, 3, 1)).unwrap();
    commands::cmd_add(&db, &config, "me", &entry("phil", 9, 100.0), date(2024, 3, 1)).unwrap();

    assert_eq!(db.count_daily_records("me").unwrap(), 1);
    let record = db.get_daily_record("me", date(2024, 3, 1)).unwrap().unwrap();
    assert_eq!(record.deposits, 9);
}

#[test]
fn test_cmd_add_unknown_geo() {
    let db = setup_test_db();
    let result = commands::cmd_add(
        &db,
        &EngineConfig::default(),
        "me",
        &entry("atlantis", 5, 100.0),
        date(2024, 3, 1),
    );
    assert!(result.is_err());
    assert_eq!(db.count_daily_records("me").unwrap(), 0);
}

#[test]
fn test_cmd_add_negative_spend() {
    let db = setup_test_db();
    let result = commands::cmd_add(
        &db,
        &EngineConfig::default(),
        "me",
        &entry("india", 5, -10.0),
        date(2024, 3, 1),
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_today_with_and_without_record() {
    let db = setup_test_db();
    let config = EngineConfig::default();
    seed_history(&db, "me", date(2024, 3, 1), &[10.0]);

    assert!(commands::cmd_today(&db, &config, "me", date(2024, 3, 1)).is_ok());
    assert!(commands::cmd_today(&db, &config, "me", date(2024, 3, 2)).is_ok());
}

#[test]
fn test_cmd_calc_does_not_store() {
    let config = EngineConfig::default();
    assert!(commands::cmd_calc(&config, &entry("algeria", 3, 80.0)).is_ok());
    assert!(commands::cmd_calc(&config, &entry("nowhere", 3, 80.0)).is_err());
}

#[test]
fn test_cmd_break_even() {
    let config = EngineConfig::default();
    assert!(commands::cmd_break_even(&config, "morocco", 146.0, 0.0).is_ok());
    assert!(commands::cmd_break_even(&config, "india", 100.0, -1.0).is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_report_periods() {
    let db = setup_test_db();
    let config = EngineConfig::default();
    let today = date(2024, 3, 20);
    seed_history(&db, "me", today, &[10.0, -5.0, 20.0, 0.0, 15.0]);

    for period in ["7", "15", "30", "month"] {
        assert!(commands::cmd_report(&db, &config, "me", period, today).is_ok());
    }
    assert!(commands::cmd_report(&db, &config, "me", "week", today).is_err());
    // Empty period is not an error
    assert!(commands::cmd_report(&db, &config, "other", "7", today).is_ok());
}

#[test]
fn test_cmd_top() {
    let db = setup_test_db();
    let config = EngineConfig::default();
    assert!(commands::cmd_top(&db, &config, "me", 10).is_ok());

    let profits: Vec<f64> = (0..12).map(|i| i as f64 * 3.0 - 10.0).collect();
    seed_history(&db, "me", date(2024, 3, 20), &profits);
    assert!(commands::cmd_top(&db, &config, "me", 10).is_ok());
}

#[test]
fn test_cmd_compare() {
    let db = setup_test_db();
    let config = EngineConfig::default();
    let today = date(2024, 3, 30);
    assert!(commands::cmd_compare(&db, &config, "me", 15, today).is_ok());

    seed_history(&db, "me", today, &[5.0; 30]);
    assert!(commands::cmd_compare(&db, &config, "me", 15, today).is_ok());
    assert!(commands::cmd_compare(&db, &config, "me", 0, today).is_err());
    assert!(commands::cmd_compare(&db, &config, "me", u32::MAX, today).is_ok());
}

#[test]
fn test_compare_days_argument_is_bounded() {
    let parse = |days: &str| Cli::try_parse_from(["arbtrack", "compare", "--days", days]);

    assert!(parse("3650").is_ok());
    assert!(parse("0").is_err());
    assert!(parse("3651").is_err());
    assert!(parse("200000000").is_err());
}

#[test]
fn test_cmd_analyze() {
    let db = setup_test_db();
    let config = EngineConfig::default();

    // Too little history is reported, not an error
    seed_history(&db, "me", date(2024, 3, 2), &[10.0, 12.0]);
    assert!(commands::cmd_analyze(&db, &config, "me", false).is_ok());

    seed_history(&db, "me", date(2024, 3, 12), &[10.0, -5.0, 20.0, 0.0, 15.0, -10.0, 30.0]);
    assert!(commands::cmd_analyze(&db, &config, "me", false).is_ok());
    assert!(commands::cmd_analyze(&db, &config, "me", true).is_ok());
}

#[test]
fn test_cmd_info() {
    let config = EngineConfig::default();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arbtrack.db");

    // Missing database is reported, not created
    assert!(commands::cmd_info(&config, &path, "me").is_ok());
    assert!(!path.exists());

    let db = commands::open_db(&path).unwrap();
    seed_history(&db, "me", date(2024, 3, 5), &[10.0, 20.0]);
    assert!(commands::cmd_info(&config, &path, "me").is_ok());
    assert_eq!(db.list_users().unwrap(), vec!["me"]);
}

// ========== Exchange Command Tests ==========

#[test]
fn test_cmd_export_import_round_trip() {
    let db = setup_test_db();
    seed_history(&db, "me", date(2024, 3, 5), &[10.0, 20.0, 30.0]);

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("stats.json");
    let csv_path = dir.path().join("stats.csv");

    commands::cmd_export(&db, "me", &json_path, "json").unwrap();
    commands::cmd_export(&db, "me", &csv_path, "csv").unwrap();
    assert!(commands::cmd_export(&db, "me", &csv_path, "xlsx").is_err());

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 4);

    commands::cmd_import(&db, "copy", &json_path).unwrap();
    assert_eq!(db.load("copy").unwrap(), db.load("me").unwrap());
}

#[test]
fn test_cmd_import_skips_unreadable_entries() {
    let db = setup_test_db();
    seed_history(&db, "me", date(2024, 3, 5), &[10.0, 20.0]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.json");
    commands::cmd_export(&db, "me", &path, "json").unwrap();

    let mut json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    json["not-a-date"] = serde_json::json!({ "net_profit": 1.0 });
    std::fs::write(&path, json.to_string()).unwrap();

    commands::cmd_import(&db, "copy", &path).unwrap();
    assert_eq!(db.count_daily_records("copy").unwrap(), 2);
}

#[test]
fn test_cmd_import_missing_file() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    assert!(commands::cmd_import(&db, "me", &dir.path().join("nope.json")).is_err());
}
