//! Period reports over a user's history
//!
//! Totals for a date range, a profit leaderboard, and a side-by-side
//! comparison of two equal-length windows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{DailyBreakdown, UserHistory};

/// Number of worst days shown under the leaderboard
pub const WORST_DAYS_SHOWN: usize = 3;

/// Preset report windows, all ending on `today`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Last7,
    Last15,
    Last30,
    CurrentMonth,
}

impl ReportPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last7 => "7",
            Self::Last15 => "15",
            Self::Last30 => "30",
            Self::CurrentMonth => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Last7 => "last 7 days",
            Self::Last15 => "last 15 days",
            Self::Last30 => "last 30 days",
            Self::CurrentMonth => "current month",
        }
    }

    /// Inclusive `(start, end)` for the period ending on `today`
    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            Self::Last7 => today - Duration::days(6),
            Self::Last15 => today - Duration::days(14),
            Self::Last30 => today - Duration::days(29),
            // Day 1 of the current month always exists
            Self::CurrentMonth => today.with_day(1).unwrap_or(today),
        };
        (start, today)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "7" => Ok(Self::Last7),
            "15" => Ok(Self::Last15),
            "30" => Ok(Self::Last30),
            "month" => Ok(Self::CurrentMonth),
            other => Err(Error::InvalidInput(format!(
                "Unknown period: {}. Available: 7, 15, 30, month",
                other
            ))),
        }
    }
}

/// Deposits and profit attributed to one geo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoTotals {
    pub geo: String,
    pub deposits: u64,
    pub net_profit: f64,
}

/// Aggregates over the records in a date range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: usize,
    pub total_deposits: u64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_gross_profit: f64,
    pub total_net_profit: f64,
    pub total_ad_spend: f64,
    /// total_net_profit / total_ad_spend, as a percentage
    pub avg_roi: f64,
    pub avg_deposits_per_day: f64,
    pub avg_profit_per_day: f64,
    /// In order of first appearance
    pub geos: Vec<GeoTotals>,
    pub best_day: (NaiveDate, f64),
    pub worst_day: (NaiveDate, f64),
}

/// Summarize the records dated within `[start, end]`
///
/// Returns `None` when the range holds no records.
pub fn summarize_period(
    history: &UserHistory,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<PeriodSummary> {
    let records = history.between(start, end);
    let (first_date, first) = records.first()?;

    let mut summary = PeriodSummary {
        start,
        end,
        days: records.len(),
        total_deposits: 0,
        total_revenue: 0.0,
        total_expenses: 0.0,
        total_gross_profit: 0.0,
        total_net_profit: 0.0,
        total_ad_spend: 0.0,
        avg_roi: 0.0,
        avg_deposits_per_day: 0.0,
        avg_profit_per_day: 0.0,
        geos: Vec::new(),
        best_day: (*first_date, first.net_profit),
        worst_day: (*first_date, first.net_profit),
    };

    for (date, record) in records {
        summary.total_deposits += u64::from(record.deposits);
        summary.total_revenue += record.revenue;
        summary.total_expenses += record.total_expenses;
        summary.total_gross_profit += record.gross_profit;
        summary.total_net_profit += record.net_profit;
        summary.total_ad_spend += record.ad_spend;

        if record.net_profit > summary.best_day.1 {
            summary.best_day = (*date, record.net_profit);
        }
        if record.net_profit < summary.worst_day.1 {
            summary.worst_day = (*date, record.net_profit);
        }

        let geo = geo_label(record);
        match summary.geos.iter_mut().find(|g| g.geo == geo) {
            Some(totals) => {
                totals.deposits += u64::from(record.deposits);
                totals.net_profit += record.net_profit;
            }
            None => summary.geos.push(GeoTotals {
                geo: geo.to_string(),
                deposits: u64::from(record.deposits),
                net_profit: record.net_profit,
            }),
        }
    }

    let days = summary.days as f64;
    summary.avg_roi = if summary.total_ad_spend > 0.0 {
        summary.total_net_profit / summary.total_ad_spend * 100.0
    } else {
        0.0
    };
    summary.avg_deposits_per_day = summary.total_deposits as f64 / days;
    summary.avg_profit_per_day = summary.total_net_profit / days;

    Some(summary)
}

fn geo_label(record: &DailyBreakdown) -> &str {
    if record.geo.is_empty() {
        "Unknown"
    } else {
        &record.geo
    }
}

/// Most and least profitable days
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopDays {
    pub best: Vec<(NaiveDate, DailyBreakdown)>,
    /// Only filled when the history is longer than the requested limit
    pub worst: Vec<(NaiveDate, DailyBreakdown)>,
}

/// Rank every day by net profit, highest first
///
/// Equal profits keep date order. The three lowest entries are returned
/// separately when there are more records than `limit`.
pub fn top_days(history: &UserHistory, limit: usize) -> TopDays {
    let mut sorted: Vec<(NaiveDate, DailyBreakdown)> = history.records().to_vec();
    sorted.sort_by(|a, b| b.1.net_profit.total_cmp(&a.1.net_profit));

    let worst = if sorted.len() > limit {
        sorted[sorted.len().saturating_sub(WORST_DAYS_SHOWN)..].to_vec()
    } else {
        Vec::new()
    };
    sorted.truncate(limit);

    TopDays {
        best: sorted,
        worst,
    }
}

/// Sums for one side of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: usize,
    pub deposits: u64,
    pub revenue: f64,
    pub expenses: f64,
    pub net_profit: f64,
}

impl PeriodTotals {
    fn collect(history: &UserHistory, start: NaiveDate, end: NaiveDate) -> Self {
        history.between(start, end).iter().fold(
            Self {
                start,
                end,
                days: 0,
                deposits: 0,
                revenue: 0.0,
                expenses: 0.0,
                net_profit: 0.0,
            },
            |mut acc, (_, r)| {
                acc.days += 1;
                acc.deposits += u64::from(r.deposits);
                acc.revenue += r.revenue;
                acc.expenses += r.total_expenses;
                acc.net_profit += r.net_profit;
                acc
            },
        )
    }

    pub fn deposits_per_day(&self) -> f64 {
        if self.days == 0 {
            0.0
        } else {
            self.deposits as f64 / self.days as f64
        }
    }

    pub fn profit_per_day(&self) -> f64 {
        if self.days == 0 {
            0.0
        } else {
            self.net_profit / self.days as f64
        }
    }
}

/// Relative change between two values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PercentChange {
    Percent(f64),
    /// Growth from zero
    Unbounded,
    /// Zero baseline, no growth
    Zero,
}

impl PercentChange {
    pub fn between(new: f64, old: f64) -> Self {
        if old == 0.0 {
            if new > 0.0 {
                Self::Unbounded
            } else {
                Self::Zero
            }
        } else {
            Self::Percent((new - old) / old * 100.0)
        }
    }
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{:+.1}%", p),
            Self::Unbounded => write!(f, "∞"),
            Self::Zero => write!(f, "0"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn between(new: f64, old: f64) -> Self {
        if new > old {
            Self::Up
        } else if new < old {
            Self::Down
        } else {
            Self::Flat
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "📈",
            Self::Down => "📉",
            Self::Flat => "➡️",
        }
    }
}

/// Current window against the window of equal length just before it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
}

impl PeriodComparison {
    pub fn deposits_change(&self) -> PercentChange {
        PercentChange::between(self.current.deposits as f64, self.previous.deposits as f64)
    }

    pub fn revenue_change(&self) -> PercentChange {
        PercentChange::between(self.current.revenue, self.previous.revenue)
    }

    pub fn expenses_change(&self) -> PercentChange {
        PercentChange::between(self.current.expenses, self.previous.expenses)
    }

    pub fn profit_change(&self) -> PercentChange {
        PercentChange::between(self.current.net_profit, self.previous.net_profit)
    }
}

/// Compare the last `days` days (ending `today`) with the `days` before them
///
/// Returns `None` if `days` is zero, the earlier window starts before the
/// first representable date, or neither window has records.
pub fn compare_periods(
    history: &UserHistory,
    today: NaiveDate,
    days: u32,
) -> Option<PeriodComparison> {
    if days == 0 {
        return None;
    }
    let span = i64::from(days);
    let days_back = |n: i64| today.checked_sub_signed(Duration::days(n));

    let current = PeriodTotals::collect(history, days_back(span - 1)?, today);
    let previous = PeriodTotals::collect(history, days_back(2 * span - 1)?, days_back(span)?);

    if current.days == 0 && previous.days == 0 {
        return None;
    }

    Some(PeriodComparison { current, previous })
}
