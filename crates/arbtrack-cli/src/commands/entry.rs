//! Day entry and calculator commands

use anyhow::{Context, Result};
use arbtrack_core::config::EngineConfig;
use arbtrack_core::db::Database;
use arbtrack_core::format::{display_date, profit_marker, usd, usd_with_kzt};
use arbtrack_core::models::{BreakEvenStatus, DailyBreakdown, DailyInputs};
use arbtrack_core::{record_day, ProfitCalculator};
use chrono::{NaiveDate, Utc};

use super::resolve_geo;

/// Recommendations shown after recording a day
const RECOMMENDATIONS_SHOWN: usize = 2;

/// One day's numbers as typed on the command line
pub struct DayEntry {
    pub geo: String,
    pub deposits: u32,
    pub spend: f64,
    pub extra: f64,
}

impl DayEntry {
    fn to_inputs(&self, config: &EngineConfig) -> Result<DailyInputs> {
        let geo = resolve_geo(config, &self.geo)?;
        let inputs = DailyInputs {
            geo: geo.name.clone(),
            deposit_rate: geo.rate,
            deposits: self.deposits,
            ad_spend: self.spend,
            additional_expenses: self.extra,
        };
        inputs.validate()?;
        Ok(inputs)
    }
}

pub fn cmd_add(
    db: &Database,
    config: &EngineConfig,
    user: &str,
    entry: &DayEntry,
    date: NaiveDate,
) -> Result<()> {
    let inputs = entry.to_inputs(config)?;
    let day = record_day(db, config, user, date, &inputs, Utc::now())
        .context("Failed to record day")?;

    println!();
    println!("✅ Saved {}", display_date(day.date));
    if day.replaced.is_some() {
        println!("   (replaced the previous entry for this day)");
    }
    print_breakdown(&day.record, config);

    println!();
    println!("💡 Recommendations:");
    for rec in day.recommendations.iter().take(RECOMMENDATIONS_SHOWN) {
        println!("   [{}] {}", rec.severity(), rec);
    }

    Ok(())
}

pub fn cmd_today(db: &Database, config: &EngineConfig, user: &str, date: NaiveDate) -> Result<()> {
    let record = db.get_daily_record(user, date).context("Failed to load record")?;

    println!();
    match record {
        Some(record) => {
            println!("📅 {}", display_date(date));
            print_breakdown(&record, config);
        }
        None => {
            println!("📭 Nothing recorded for {}.", display_date(date));
            println!("   Record it with: arbtrack add --geo <geo> -n <deposits> --spend <usd>");
        }
    }

    Ok(())
}

pub fn cmd_calc(config: &EngineConfig, entry: &DayEntry) -> Result<()> {
    let inputs = entry.to_inputs(config)?;
    let calculator = ProfitCalculator::new(config);
    let record = calculator.breakdown(&inputs, Utc::now());
    let break_even = calculator.compute_break_even(
        inputs.ad_spend,
        inputs.additional_expenses,
        inputs.deposit_rate,
    );

    println!();
    println!("🧮 Quick calculation (not saved)");
    print_breakdown(&record, config);

    println!();
    println!(
        "   Break-even: {:.1} deposits ({})",
        break_even.deposits_needed,
        usd(break_even.revenue_needed)
    );
    match break_even.status(inputs.deposits) {
        BreakEvenStatus::Above { margin } => {
            println!("   ✅ {:.1} deposits above break-even", margin)
        }
        BreakEvenStatus::Below { shortfall } => {
            println!("   ❌ {:.1} deposits short of break-even", shortfall)
        }
    }

    Ok(())
}

pub fn cmd_break_even(config: &EngineConfig, geo: &str, spend: f64, extra: f64) -> Result<()> {
    let entry = DayEntry {
        geo: geo.to_string(),
        deposits: 0,
        spend,
        extra,
    };
    let inputs = entry.to_inputs(config)?;
    let result = ProfitCalculator::new(config).compute_break_even(
        inputs.ad_spend,
        inputs.additional_expenses,
        inputs.deposit_rate,
    );

    println!();
    println!("⚖️  Break-even for {} (${:.0}/deposit)", inputs.geo, inputs.deposit_rate);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Ad spend:        {}", usd(inputs.ad_spend));
    println!("   Fixed expenses:  {}", usd(config.fixed_expenses));
    println!("   Extra expenses:  {}", usd(inputs.additional_expenses));
    println!("   Total expenses:  {}", usd(result.total_expenses));
    println!();
    println!("   Deposits needed: {:.1}", result.deposits_needed);
    println!("   Revenue needed:  {}", usd(result.revenue_needed));
    println!(
        "   Minimum whole deposits: {}",
        result.deposits_needed.ceil() as u64
    );

    Ok(())
}

fn print_breakdown(record: &DailyBreakdown, config: &EngineConfig) {
    let kzt = config.usd_to_kzt;

    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Geo: {} (${:.0}/deposit) │ Deposits: {}",
        record.geo, record.deposit_rate, record.deposits
    );
    println!("   Revenue:         {}", usd(record.revenue));
    println!(
        "   Expenses:        {} (ads {}, fixed {}, extra {})",
        usd(record.total_expenses),
        usd(record.ad_spend),
        usd(config.fixed_expenses),
        usd(record.additional_expenses)
    );
    println!("   Gross profit:    {}", usd(record.gross_profit));
    println!("   My share:        {}", usd(record.my_share));
    if record.platform_fee != 0.0 {
        println!("   Platform fee:    {}", usd(record.platform_fee));
    }
    println!(
        "   {} Net profit:   {}",
        profit_marker(record.net_profit),
        usd_with_kzt(record.net_profit, kzt)
    );
    println!(
        "   ROI: {:.1}% gross │ {:.1}% net",
        record.roi_gross, record.roi_net
    );
}
