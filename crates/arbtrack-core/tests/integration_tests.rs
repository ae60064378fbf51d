//! Integration tests for arbtrack-core
//!
//! These tests exercise the full add → store → analyze workflow, plus
//! moving a history through the JSON exchange format.

use arbtrack_core::{
    db::Database,
    export::{export_json, import_history_file, write_atomic},
    insights::{InsightEngine, MonthlyForecast, PatternInsight},
    models::DailyInputs,
    recommend_for_day,
    reports::{self, ReportPeriod},
    EngineConfig, ProfitCalculator, Recommendation, RecordStore,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};

fn start_date() -> NaiveDate {
    // A Monday
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

/// Seven days on Philippines traffic at $100/day
/// Net profits: 48, -12, 68, 28, 98, 8, 88
const DEPOSITS: [u32; 7] = [10, 4, 12, 8, 15, 6, 14];

fn record_week(db: &Database, config: &EngineConfig, user: &str) {
    let calculator = ProfitCalculator::new(config);
    let geo = config.find_geo("phil").expect("default geos include Philippines");

    for (i, deposits) in DEPOSITS.iter().enumerate() {
        let inputs = DailyInputs {
            geo: geo.name.clone(),
            deposit_rate: geo.rate,
            deposits: *deposits,
            ad_spend: 100.0,
            additional_expenses: 0.0,
        };
        inputs.validate().expect("inputs are valid");

        let created_at = Utc.with_ymd_and_hms(2024, 3, 4 + i as u32, 20, 0, 0).unwrap();
        let record = calculator.breakdown(&inputs, created_at);
        db.upsert(user, start_date() + Duration::days(i as i64), &record)
            .expect("Failed to store record");
    }
}

// =============================================================================
// Workflow Tests
// =============================================================================

#[test]
fn test_add_store_analyze_workflow() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let config = EngineConfig::default();
    record_week(&db, &config, "trader");

    let history = db.load("trader").unwrap();
    assert_eq!(history.len(), 7);
    assert_eq!(
        history.net_profits(),
        vec![48.0, -12.0, 68.0, 28.0, 98.0, 8.0, 88.0]
    );

    let engine = InsightEngine::new();
    assert!(engine.is_ready(&history));
    let report = engine.analyze(&history);

    assert_eq!(report.days, 7);
    // One record per weekday, Friday (98) best and Tuesday (-12) worst
    assert!(report.patterns.iter().any(|p| matches!(
        p,
        PatternInsight::BestWeekday { weekday: chrono::Weekday::Fri, .. }
    )));
    assert!(report.patterns.iter().any(|p| matches!(
        p,
        PatternInsight::WorstWeekday { weekday: chrono::Weekday::Tue, .. }
    )));

    match report.forecast {
        MonthlyForecast::Projected { monthly, .. } => {
            assert!((monthly - 326.0 / 7.0 * 30.0).abs() < 1e-9)
        }
        other => panic!("expected a projection, got {:?}", other),
    }

    // Analysis is a pure function of the snapshot
    assert_eq!(engine.analyze(&history), report);
}

#[test]
fn test_recommendations_for_latest_day() {
    let db = Database::in_memory().unwrap();
    let config = EngineConfig::default();
    record_week(&db, &config, "trader");

    let last_day = start_date() + Duration::days(6);
    let recommendations = recommend_for_day(&db, "trader", last_day)
        .unwrap()
        .expect("last day was recorded");

    // 88 is within 80% of the 98 record; ROI 88% needs no action
    assert_eq!(recommendations, vec![Recommendation::TopDay]);

    let missing = recommend_for_day(&db, "trader", last_day + Duration::days(1)).unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_reentering_a_day_replaces_it() {
    let db = Database::in_memory().unwrap();
    let config = EngineConfig::default();
    record_week(&db, &config, "trader");

    let calculator = ProfitCalculator::new(&config);
    let corrected = calculator.breakdown(
        &DailyInputs {
            geo: "India".to_string(),
            deposit_rate: 40.0,
            deposits: 5,
            ad_spend: 100.0,
            additional_expenses: 0.0,
        },
        Utc::now(),
    );
    db.upsert("trader", start_date(), &corrected).unwrap();

    let history = db.load("trader").unwrap();
    assert_eq!(history.len(), 7);
    assert_eq!(history.get(start_date()).unwrap().geo, "India");
    assert_eq!(history.get(start_date()).unwrap().net_profit, 48.0);
}

#[test]
fn test_week_report_matches_history() {
    let db = Database::in_memory().unwrap();
    record_week(&db, &EngineConfig::default(), "trader");
    let history = db.load("trader").unwrap();

    let today = start_date() + Duration::days(6);
    let (from, to) = ReportPeriod::Last7.range(today);
    let summary = reports::summarize_period(&history, from, to).unwrap();

    assert_eq!(summary.days, 7);
    assert_eq!(summary.total_deposits, 69);
    assert!((summary.total_net_profit - 326.0).abs() < 1e-9);
    assert_eq!(summary.best_day, (start_date() + Duration::days(4), 98.0));
    assert_eq!(summary.geos.len(), 1);

    let top = reports::top_days(&history, 3);
    assert_eq!(top.best[0].1.net_profit, 98.0);
    assert_eq!(top.worst.last().unwrap().1.net_profit, -12.0);
}

// =============================================================================
// Exchange Tests
// =============================================================================

#[test]
fn test_export_then_import_into_new_store() {
    let source = Database::in_memory().unwrap();
    record_week(&source, &EngineConfig::default(), "trader");
    let history = source.load("trader").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats_trader.json");
    write_atomic(&path, &export_json(&history).unwrap()).unwrap();

    let target = Database::in_memory().unwrap();
    let summary = import_history_file(&target, "restored", &path).unwrap();
    assert_eq!(summary.imported, 7);
    assert_eq!(summary.skipped, 0);
    assert_eq!(target.load("restored").unwrap(), history);
}

#[test]
fn test_file_backed_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arbtrack.db");
    let path = path.to_string_lossy();

    {
        let db = Database::new(&path).unwrap();
        record_week(&db, &EngineConfig::default(), "trader");
    }

    let reopened = Database::new(&path).unwrap();
    assert_eq!(reopened.count_daily_records("trader").unwrap(), 7);
    assert_eq!(reopened.list_users().unwrap(), vec!["trader"]);
}
