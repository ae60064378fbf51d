//! Advice for the day just entered, relative to the stored history

use crate::format::mean;
use crate::models::{DailyBreakdown, UserHistory};

use super::types::Recommendation;

pub const CRITICAL_ROI: f64 = 20.0;
pub const LOW_ROI: f64 = 50.0;
pub const SCALE_UP_ROI: f64 = 100.0;

/// Spend above this multiple of the average is flagged
pub const OVERSPEND_FACTOR: f64 = 1.5;
/// Spend below this multiple of the average is flagged
pub const UNDERSPEND_FACTOR: f64 = 0.5;

/// Share of the record profit that counts as a top day
pub const TOP_DAY_FACTOR: f64 = 0.8;
/// Below this share of the record profit, point at the record day
pub const BELOW_RECORD_FACTOR: f64 = 0.3;

/// Rules fire in order: ROI band, spend vs average, profit vs record
///
/// Returns `[AllNormal]` when nothing fires. Works with any amount of
/// history; the spend and record rules are skipped when it is empty.
pub fn recommend(current: &DailyBreakdown, history: &UserHistory) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let roi = current.roi_net;
    if roi < CRITICAL_ROI {
        recommendations.push(Recommendation::CriticalRoi);
    } else if roi < LOW_ROI {
        recommendations.push(Recommendation::LowRoi);
    } else if roi > SCALE_UP_ROI {
        recommendations.push(Recommendation::ScaleUp);
    }

    if !history.is_empty() {
        let spends: Vec<f64> = history.iter().map(|(_, r)| r.ad_spend).collect();
        let avg_spend = mean(&spends);
        if current.ad_spend > avg_spend * OVERSPEND_FACTOR {
            recommendations.push(Recommendation::Overspending);
        } else if current.ad_spend < avg_spend * UNDERSPEND_FACTOR {
            recommendations.push(Recommendation::BudgetTooLow);
        }

        let best_profit = history
            .iter()
            .map(|(_, r)| r.net_profit)
            .fold(f64::NEG_INFINITY, f64::max);
        if current.net_profit >= best_profit * TOP_DAY_FACTOR {
            recommendations.push(Recommendation::TopDay);
        } else if current.net_profit < best_profit * BELOW_RECORD_FACTOR {
            recommendations.push(Recommendation::BelowRecord { best_profit });
        }
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::AllNormal);
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{breakdown, date};

    fn day(ad_spend: f64, net_profit: f64, roi_net: f64) -> DailyBreakdown {
        let mut b = breakdown(ad_spend, net_profit);
        b.roi_net = roi_net;
        b
    }

    fn history(days: &[(f64, f64)]) -> UserHistory {
        UserHistory::from_records(
            days.iter().enumerate().map(|(i, (spend, profit))| {
                (date(2024, 1, 1 + i as u32), breakdown(*spend, *profit))
            }),
        )
    }

    #[test]
    fn test_roi_bands() {
        let empty = UserHistory::new();
        assert_eq!(
            recommend(&day(100.0, 5.0, 10.0), &empty),
            vec![Recommendation::CriticalRoi]
        );
        assert_eq!(
            recommend(&day(100.0, 5.0, 20.0), &empty),
            vec![Recommendation::LowRoi]
        );
        assert_eq!(
            recommend(&day(100.0, 5.0, 150.0), &empty),
            vec![Recommendation::ScaleUp]
        );
    }

    #[test]
    fn test_mid_band_without_history_is_normal() {
        for roi in [50.0, 75.0, 100.0] {
            assert_eq!(
                recommend(&day(100.0, 50.0, roi), &UserHistory::new()),
                vec![Recommendation::AllNormal]
            );
        }
    }

    #[test]
    fn test_overspending() {
        let h = history(&[(100.0, 50.0), (100.0, 50.0), (200.0, 50.0)]);
        // avg spend 133.3, 1.5x = 200
        let recs = recommend(&day(201.0, 45.0, 60.0), &h);
        assert_eq!(recs, vec![Recommendation::Overspending, Recommendation::TopDay]);
    }

    #[test]
    fn test_budget_too_low() {
        let h = history(&[(100.0, 50.0), (100.0, 50.0)]);
        let recs = recommend(&day(40.0, 45.0, 60.0), &h);
        assert_eq!(recs, vec![Recommendation::BudgetTooLow, Recommendation::TopDay]);
    }

    #[test]
    fn test_top_day_threshold_inclusive() {
        let h = history(&[(100.0, 100.0)]);
        let recs = recommend(&day(100.0, 80.0, 60.0), &h);
        assert_eq!(recs, vec![Recommendation::TopDay]);
    }

    #[test]
    fn test_below_record() {
        let h = history(&[(100.0, 100.0), (100.0, 20.0)]);
        let recs = recommend(&day(100.0, 20.0, 60.0), &h);
        assert_eq!(
            recs,
            vec![Recommendation::BelowRecord { best_profit: 100.0 }]
        );
    }

    #[test]
    fn test_between_record_thresholds_is_silent() {
        let h = history(&[(100.0, 100.0)]);
        let recs = recommend(&day(100.0, 50.0, 60.0), &h);
        assert_eq!(recs, vec![Recommendation::AllNormal]);
    }

    #[test]
    fn test_all_rules_in_order() {
        let h = history(&[(100.0, 100.0), (100.0, 100.0)]);
        let recs = recommend(&day(10.0, -5.0, -50.0), &h);
        assert_eq!(
            recs,
            vec![
                Recommendation::CriticalRoi,
                Recommendation::BudgetTooLow,
                Recommendation::BelowRecord { best_profit: 100.0 },
            ]
        );
    }
}
