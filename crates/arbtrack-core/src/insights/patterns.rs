//! Weekday, trend and stability patterns over the whole history

use chrono::{Datelike, Weekday};

use crate::format::mean;
use crate::models::UserHistory;

use super::types::{PatternInsight, TrendDirection};

/// Minimum records before any pattern is reported
pub const MIN_PATTERN_DAYS: usize = 3;

/// Number of most recent records the trend compares across
pub const TREND_WINDOW: usize = 7;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Best/worst weekday, recent trend, success rate and average profit
///
/// Output order is fixed: best day, worst day, trend, success rate, average.
pub fn analyze_patterns(history: &UserHistory) -> Vec<PatternInsight> {
    if history.len() < MIN_PATTERN_DAYS {
        return vec![PatternInsight::InsufficientData];
    }

    let mut insights = Vec::with_capacity(5);

    if let Some((best, worst)) = best_and_worst_weekday(history) {
        insights.push(PatternInsight::BestWeekday {
            weekday: best.0,
            average: best.1,
        });
        insights.push(PatternInsight::WorstWeekday {
            weekday: worst.0,
            average: worst.1,
        });
    }

    if let Some(direction) = trend(history) {
        insights.push(PatternInsight::Trend { direction });
    }

    let profits = history.net_profits();
    let profitable = profits.iter().filter(|p| **p > 0.0).count();
    insights.push(PatternInsight::SuccessRate {
        percent: profitable as f64 / profits.len() as f64 * 100.0,
    });
    insights.push(PatternInsight::AverageProfit {
        amount: mean(&profits),
    });

    insights
}

/// Weekday means in Monday..Sunday order; ties keep the earlier weekday
fn best_and_worst_weekday(history: &UserHistory) -> Option<((Weekday, f64), (Weekday, f64))> {
    let mut buckets: [Vec<f64>; 7] = Default::default();
    for (date, record) in history.iter() {
        buckets[date.weekday().num_days_from_monday() as usize].push(record.net_profit);
    }

    let mut averages = WEEKDAYS
        .iter()
        .zip(buckets.iter())
        .filter(|(_, profits)| !profits.is_empty())
        .map(|(day, profits)| (*day, mean(profits)));

    let first = averages.next()?;
    let (best, worst) = averages.fold((first, first), |(best, worst), current| {
        (
            if current.1 > best.1 { current } else { best },
            if current.1 < worst.1 { current } else { worst },
        )
    });

    Some((best, worst))
}

/// Last vs first net profit of the recent window; a tie counts as falling
fn trend(history: &UserHistory) -> Option<TrendDirection> {
    let recent = history.last_n(TREND_WINDOW);
    if recent.len() < MIN_PATTERN_DAYS {
        return None;
    }
    let first = recent.first()?.1.net_profit;
    let last = recent.last()?.1.net_profit;

    Some(if last > first {
        TrendDirection::Rising
    } else {
        TrendDirection::Falling
    })
}
