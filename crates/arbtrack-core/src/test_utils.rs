//! Test fixtures for arbtrack-core
//!
//! Builders for synthetic daily records and histories, so analytics can be
//! tested without going through the calculator or a store.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::models::{DailyBreakdown, UserHistory};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Fixed creation time so fixtures compare equal across runs
pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// A record with the given spend and net profit, other fields derived
/// with the default 50% share and no platform fee
pub fn breakdown(ad_spend: f64, net_profit: f64) -> DailyBreakdown {
    let gross_profit = net_profit * 2.0;
    let total_expenses = ad_spend + 4.0;
    let revenue = gross_profit + total_expenses;
    let (roi_gross, roi_net) = if ad_spend > 0.0 {
        (
            gross_profit / ad_spend * 100.0,
            net_profit / ad_spend * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    DailyBreakdown {
        geo: "Philippines".to_string(),
        deposit_rate: 20.0,
        deposits: (revenue / 20.0).max(0.0).round() as u32,
        ad_spend,
        additional_expenses: 0.0,
        revenue,
        total_expenses,
        gross_profit,
        my_share: net_profit,
        platform_fee: 0.0,
        net_profit,
        roi_gross,
        roi_net,
        created_at: timestamp(),
    }
}

/// A $100-spend record with the given net profit
pub fn breakdown_with_profit(net_profit: f64) -> DailyBreakdown {
    breakdown(100.0, net_profit)
}

/// A record with the given spend and an exact net ROI
pub fn breakdown_with_spend_roi(ad_spend: f64, roi_net: f64) -> DailyBreakdown {
    let mut record = breakdown(ad_spend, roi_net * ad_spend / 100.0);
    record.roi_net = roi_net;
    record
}

/// Consecutive days starting at `start`, one per profit value
pub fn history_from_profits(start: NaiveDate, profits: &[f64]) -> UserHistory {
    UserHistory::from_records(
        profits
            .iter()
            .enumerate()
            .map(|(i, p)| (start + Duration::days(i as i64), breakdown_with_profit(*p))),
    )
}
