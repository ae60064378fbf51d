//! Monthly profit projection and budget suggestion

use crate::format::mean;
use crate::models::UserHistory;

use super::types::{BudgetSuggestion, MonthlyForecast};

/// Minimum records before a forecast is produced
pub const MIN_FORECAST_DAYS: usize = 7;

/// Number of most recent records averaged for the forecast
pub const FORECAST_WINDOW: usize = 7;

/// Days in a projected month
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Minimum records before a budget is suggested
pub const MIN_BUDGET_DAYS: usize = 5;

/// Net ROI (percent) above which a day counts as high-performing
pub const HIGH_ROI_THRESHOLD: f64 = 50.0;

/// Average of the last 7 days' net profit, times 30
///
/// No weighting or seasonality.
pub fn predict_monthly_profit(history: &UserHistory) -> MonthlyForecast {
    if history.len() < MIN_FORECAST_DAYS {
        return MonthlyForecast::InsufficientData;
    }

    let recent: Vec<f64> = history
        .last_n(FORECAST_WINDOW)
        .iter()
        .map(|(_, r)| r.net_profit)
        .collect();
    let daily_average = mean(&recent);

    MonthlyForecast::Projected {
        daily_average,
        monthly: daily_average * DAYS_PER_MONTH,
    }
}

/// Mean spend and ROI over days with net ROI above 50%
pub fn suggest_optimal_budget(history: &UserHistory) -> BudgetSuggestion {
    if history.len() < MIN_BUDGET_DAYS {
        return BudgetSuggestion::InsufficientData;
    }

    let (spends, rois): (Vec<f64>, Vec<f64>) = history
        .iter()
        .filter(|(_, r)| r.roi_net > HIGH_ROI_THRESHOLD)
        .map(|(_, r)| (r.ad_spend, r.roi_net))
        .unzip();

    if spends.is_empty() {
        return BudgetSuggestion::NoHighRoiDays;
    }

    BudgetSuggestion::Suggested {
        ad_spend: mean(&spends),
        roi_net: mean(&rois),
        sample_days: spends.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{breakdown_with_spend_roi, date, history_from_profits};

    #[test]
    fn test_forecast_needs_seven_days() {
        let history = history_from_profits(date(2024, 1, 1), &[10.0; 6]);
        assert_eq!(
            predict_monthly_profit(&history),
            MonthlyForecast::InsufficientData
        );
    }

    #[test]
    fn test_forecast_reference_week() {
        let history =
            history_from_profits(date(2024, 1, 1), &[10.0, -5.0, 20.0, 0.0, 15.0, -10.0, 30.0]);

        match predict_monthly_profit(&history) {
            MonthlyForecast::Projected {
                daily_average,
                monthly,
            } => {
                assert!((daily_average - 60.0 / 7.0).abs() < 1e-9);
                assert!((monthly - 257.142857).abs() < 1e-5);
            }
            other => panic!("expected projection, got {:?}", other),
        }
    }

    #[test]
    fn test_forecast_ignores_older_days() {
        let mut profits = vec![1000.0; 3];
        profits.extend([2.0; 7]);
        let history = history_from_profits(date(2024, 1, 1), &profits);

        assert_eq!(
            predict_monthly_profit(&history),
            MonthlyForecast::Projected {
                daily_average: 2.0,
                monthly: 60.0
            }
        );
    }

    #[test]
    fn test_budget_needs_five_days() {
        let history = history_from_profits(date(2024, 1, 1), &[10.0; 4]);
        assert_eq!(
            suggest_optimal_budget(&history),
            BudgetSuggestion::InsufficientData
        );
    }

    #[test]
    fn test_budget_without_high_roi_days() {
        let history = crate::models::UserHistory::from_records(
            (1..=5).map(|d| (date(2024, 1, d), breakdown_with_spend_roi(100.0, 50.0))),
        );
        assert_eq!(
            suggest_optimal_budget(&history),
            BudgetSuggestion::NoHighRoiDays
        );
    }

    #[test]
    fn test_budget_averages_high_roi_days() {
        let history = crate::models::UserHistory::from_records(vec![
            (date(2024, 1, 1), breakdown_with_spend_roi(100.0, 60.0)),
            (date(2024, 1, 2), breakdown_with_spend_roi(200.0, 80.0)),
            (date(2024, 1, 3), breakdown_with_spend_roi(500.0, 10.0)),
            (date(2024, 1, 4), breakdown_with_spend_roi(300.0, 50.0)),
            (date(2024, 1, 5), breakdown_with_spend_roi(150.0, 100.0)),
        ]);

        match suggest_optimal_budget(&history) {
            BudgetSuggestion::Suggested {
                ad_spend,
                roi_net,
                sample_days,
            } => {
                assert_eq!(sample_days, 3);
                assert!((ad_spend - 150.0).abs() < 1e-9);
                assert!((roi_net - 80.0).abs() < 1e-9);
            }
            other => panic!("expected suggestion, got {:?}", other),
        }
    }
}
