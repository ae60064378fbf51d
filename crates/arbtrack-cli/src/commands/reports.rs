//! Report command implementations

use std::path::Path;

use anyhow::{Context, Result};
use arbtrack_core::config::EngineConfig;
use arbtrack_core::db::Database;
use arbtrack_core::format::{display_date, profit_marker, usd, usd_with_kzt};
use arbtrack_core::insights::{BudgetSuggestion, InsightEngine, MonthlyForecast};
use arbtrack_core::models::DailyBreakdown;
use arbtrack_core::reports::{self, Direction, PercentChange, ReportPeriod};
use chrono::NaiveDate;

use super::open_db;

pub fn cmd_report(
    db: &Database,
    config: &EngineConfig,
    user: &str,
    period: &str,
    today: NaiveDate,
) -> Result<()> {
    let period: ReportPeriod = period.parse()?;
    let history = db
        .list_daily_records(user)
        .context("Failed to load history")?;
    let (from, to) = period.range(today);

    println!();
    println!("📊 Report for the {}", period.label());
    println!("   Period: {} to {}", display_date(from), display_date(to));
    println!("   ─────────────────────────────────────────────────────────────");

    let Some(summary) = reports::summarize_period(&history, from, to) else {
        println!("   No data recorded in this period.");
        return Ok(());
    };

    let kzt = config.usd_to_kzt;
    println!("   Deposits:        {}", summary.total_deposits);
    println!("   Revenue:         {}", usd(summary.total_revenue));
    println!("   Expenses:        {}", usd(summary.total_expenses));
    println!("   Gross profit:    {}", usd(summary.total_gross_profit));
    println!(
        "   {} Net profit:   {}",
        profit_marker(summary.total_net_profit),
        usd_with_kzt(summary.total_net_profit, kzt)
    );
    println!("   Average ROI:     {:.1}%", summary.avg_roi);

    println!();
    println!("   Days recorded:   {}", summary.days);
    println!("   Deposits/day:    {:.1}", summary.avg_deposits_per_day);
    println!("   Profit/day:      {}", usd(summary.avg_profit_per_day));

    println!();
    println!("   {:20} │ {:>8} │ {:>12}", "Geo", "Deposits", "Profit");
    println!("   ─────────────────────┼──────────┼──────────────");
    for geo in &summary.geos {
        println!(
            "   {:20} │ {:>8} │ {:>12}",
            geo.geo,
            geo.deposits,
            usd(geo.net_profit)
        );
    }

    println!();
    println!(
        "   🎯 Best day:  {} ({})",
        display_date(summary.best_day.0),
        usd_with_kzt(summary.best_day.1, kzt)
    );
    println!(
        "   📉 Worst day: {} ({})",
        display_date(summary.worst_day.0),
        usd_with_kzt(summary.worst_day.1, kzt)
    );

    Ok(())
}

pub fn cmd_top(db: &Database, config: &EngineConfig, user: &str, limit: usize) -> Result<()> {
    let history = db
        .list_daily_records(user)
        .context("Failed to load history")?;

    println!();
    if history.is_empty() {
        println!("📭 No data to rank yet.");
        return Ok(());
    }

    let top = reports::top_days(&history, limit);

    println!("🔥 Top {} days by profit", top.best.len());
    println!("   ─────────────────────────────────────────────────────────────");
    for (i, (date, record)) in top.best.iter().enumerate() {
        print_ranked_day(i + 1, *date, record, config);
    }

    if !top.worst.is_empty() {
        println!();
        println!("📉 Worst days");
        println!("   ─────────────────────────────────────────────────────────────");
        for (i, (date, record)) in top.worst.iter().enumerate() {
            print_ranked_day(i + 1, *date, record, config);
        }
    }

    Ok(())
}

fn print_ranked_day(rank: usize, date: NaiveDate, record: &DailyBreakdown, config: &EngineConfig) {
    println!(
        "   {:>2}. {} {} ({})",
        rank,
        profit_marker(record.net_profit),
        display_date(date),
        record.geo
    );
    println!(
        "       {} │ {} deposits │ {:.1}% ROI",
        usd_with_kzt(record.net_profit, config.usd_to_kzt),
        record.deposits,
        record.roi_net
    );
}

pub fn cmd_compare(
    db: &Database,
    config: &EngineConfig,
    user: &str,
    days: u32,
    today: NaiveDate,
) -> Result<()> {
    if days == 0 {
        anyhow::bail!("--days must be at least 1");
    }
    let history = db
        .list_daily_records(user)
        .context("Failed to load history")?;

    println!();
    let Some(cmp) = reports::compare_periods(&history, today, days) else {
        println!("📭 No data in the last {} days.", u64::from(days) * 2);
        return Ok(());
    };

    let (cur, prev) = (&cmp.current, &cmp.previous);
    println!("📊 Period comparison ({} days)", days);
    println!(
        "   Current:  {} to {} ({} days recorded)",
        display_date(cur.start),
        display_date(cur.end),
        cur.days
    );
    println!(
        "   Previous: {} to {} ({} days recorded)",
        display_date(prev.start),
        display_date(prev.end),
        prev.days
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:10} │ {:>14} │ {:>14} │ {:>10}",
        "", "Current", "Previous", "Change"
    );
    print_change_row(
        "Deposits",
        cur.deposits.to_string(),
        prev.deposits.to_string(),
        Direction::between(cur.deposits as f64, prev.deposits as f64),
        cmp.deposits_change(),
    );
    print_change_row(
        "Revenue",
        usd(cur.revenue),
        usd(prev.revenue),
        Direction::between(cur.revenue, prev.revenue),
        cmp.revenue_change(),
    );
    // Lower spend is the good direction
    print_change_row(
        "Expenses",
        usd(cur.expenses),
        usd(prev.expenses),
        Direction::between(prev.expenses, cur.expenses),
        cmp.expenses_change(),
    );
    print_change_row(
        "Profit",
        usd(cur.net_profit),
        usd(prev.net_profit),
        Direction::between(cur.net_profit, prev.net_profit),
        cmp.profit_change(),
    );

    println!();
    println!(
        "   Per day: {:.1} vs {:.1} deposits │ {} vs {}",
        cur.deposits_per_day(),
        prev.deposits_per_day(),
        usd(cur.profit_per_day()),
        usd(prev.profit_per_day())
    );
    println!(
        "   Profit now: {}",
        usd_with_kzt(cur.net_profit, config.usd_to_kzt)
    );

    Ok(())
}

fn print_change_row(
    label: &str,
    current: String,
    previous: String,
    direction: Direction,
    change: PercentChange,
) {
    println!(
        "   {:10} │ {:>14} │ {:>14} │ {} {:>7}",
        label,
        current,
        previous,
        direction.arrow(),
        change.to_string()
    );
}

pub fn cmd_analyze(db: &Database, config: &EngineConfig, user: &str, json: bool) -> Result<()> {
    let history = db
        .list_daily_records(user)
        .context("Failed to load history")?;
    let engine = InsightEngine::new();

    if !engine.is_ready(&history) {
        if json {
            println!("{}", serde_json::json!({ "days": history.len(), "ready": false }));
        } else {
            println!();
            println!(
                "📭 Analysis needs at least {} recorded days (have {}).",
                InsightEngine::MIN_HISTORY_DAYS,
                history.len()
            );
        }
        return Ok(());
    }

    let report = engine.analyze(&history);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("🤖 Analysis of {} recorded days", report.days);
    println!("   ─────────────────────────────────────────────────────────────");

    println!();
    println!("📈 Patterns");
    for insight in &report.patterns {
        println!("   • {}", insight);
    }

    println!();
    println!("⚠️  Anomalies");
    if report.anomalies.is_empty() {
        println!("   None detected");
    }
    for anomaly in &report.anomalies {
        println!("   • {}", anomaly);
    }

    println!();
    println!("🔮 Forecast");
    match report.forecast {
        MonthlyForecast::Projected {
            daily_average,
            monthly,
        } => {
            println!(
                "   {}/day → {} over 30 days",
                usd(daily_average),
                usd_with_kzt(monthly, config.usd_to_kzt)
            );
        }
        MonthlyForecast::InsufficientData => println!("   {}", report.forecast),
    }

    println!();
    println!("💰 Budget");
    println!("   {}", report.budget);
    if let BudgetSuggestion::Suggested { sample_days, .. } = report.budget {
        println!("   Based on {} days with net ROI above 50%", sample_days);
    }

    Ok(())
}

pub fn cmd_info(config: &EngineConfig, db_path: &Path, user: &str) -> Result<()> {
    println!();
    println!("ℹ️  arbtrack configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Database:        {}", db_path.display());
    if db_path.exists() {
        let db = open_db(db_path)?;
        let users = db.list_users().context("Failed to list users")?;
        let days = db
            .count_daily_records(user)
            .context("Failed to count records")?;
        println!("   Users:           {}", users.len());
        println!("   Days recorded:   {} (user {})", days, user);
    } else {
        println!("   (not created yet)");
    }
    println!("   Fixed expenses:  {}/day", usd(config.fixed_expenses));
    println!("   My share:        {:.0}%", config.my_share_fraction * 100.0);
    println!("   Platform fee:    {:.0}%", config.platform_fee_fraction * 100.0);
    println!("   USD → KZT:       {:.2}", config.usd_to_kzt);

    println!();
    println!("   {:20} │ {:>10}", "Geo", "Per deposit");
    println!("   ─────────────────────┼────────────");
    for geo in &config.geos {
        println!("   {:20} │ {:>10}", geo.name, usd(geo.rate));
    }

    println!();
    println!("   Formulas:");
    println!("   revenue        = deposits × rate");
    println!("   total expenses = ad spend + fixed + extra");
    println!("   gross profit   = revenue − total expenses");
    println!("   my share       = gross profit × share");
    println!("   net profit     = my share − my share × platform fee");
    println!("   ROI            = profit ÷ ad spend × 100 (0 when spend is 0)");

    Ok(())
}
