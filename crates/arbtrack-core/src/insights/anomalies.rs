//! Outlier days by net profit

use crate::format::{mean, population_std_dev};
use crate::models::UserHistory;

use super::types::{Anomaly, AnomalyKind};

/// Minimum records before anomalies are looked for
pub const MIN_ANOMALY_DAYS: usize = 5;

/// Distance from the mean, in standard deviations, that counts as anomalous
pub const ANOMALY_SIGMA: f64 = 2.0;

/// Only the most recent anomalies are reported
pub const MAX_ANOMALIES: usize = 5;

/// Days whose net profit is more than 2σ from the mean (population σ)
///
/// Scanned oldest to newest; only the last five found are kept.
pub fn detect_anomalies(history: &UserHistory) -> Vec<Anomaly> {
    if history.len() < MIN_ANOMALY_DAYS {
        return vec![];
    }

    let profits = history.net_profits();
    let avg = mean(&profits);
    let std_dev = population_std_dev(&profits);
    if std_dev <= 0.0 {
        return vec![];
    }

    let mut anomalies: Vec<Anomaly> = history
        .iter()
        .filter(|(_, r)| (r.net_profit - avg).abs() > ANOMALY_SIGMA * std_dev)
        .map(|(date, r)| Anomaly {
            date: *date,
            net_profit: r.net_profit,
            kind: if r.net_profit > avg {
                AnomalyKind::High
            } else {
                AnomalyKind::Low
            },
        })
        .collect();

    let excess = anomalies.len().saturating_sub(MAX_ANOMALIES);
    anomalies.drain(..excess);
    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, history_from_profits};

    #[test]
    fn test_requires_five_records() {
        let history = history_from_profits(date(2024, 1, 1), &[0.0, 0.0, 0.0, 1000.0]);
        assert!(detect_anomalies(&history).is_empty());
    }

    #[test]
    fn test_flat_history_has_no_anomalies() {
        let history = history_from_profits(date(2024, 1, 1), &[10.0; 8]);
        assert!(detect_anomalies(&history).is_empty());
    }

    #[test]
    fn test_single_high_outlier() {
        let mut profits = vec![10.0; 20];
        profits.push(30.0);
        let history = history_from_profits(date(2024, 1, 1), &profits);

        let anomalies = detect_anomalies(&history);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].date, date(2024, 1, 21));
        assert_eq!(anomalies[0].net_profit, 30.0);
        assert_eq!(anomalies[0].kind, AnomalyKind::High);
    }

    #[test]
    fn test_outlier_five_sigma_above_mean() {
        // 25 days at 9.6 and one at 20: mean 10, σ 2
        let mut profits = vec![9.6; 25];
        profits.push(20.0);
        assert!((mean(&profits) - 10.0).abs() < 1e-9);
        assert!((population_std_dev(&profits) - 2.0).abs() < 1e-9);

        let history = history_from_profits(date(2024, 1, 1), &profits);
        let anomalies = detect_anomalies(&history);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].net_profit, 20.0);
        assert_eq!(anomalies[0].kind, AnomalyKind::High);
    }

    #[test]
    fn test_single_low_outlier() {
        let mut profits = vec![10.0; 20];
        profits[4] = -40.0;
        let history = history_from_profits(date(2024, 1, 1), &profits);

        let anomalies = detect_anomalies(&history);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].date, date(2024, 1, 5));
        assert_eq!(anomalies[0].kind, AnomalyKind::Low);
    }

    #[test]
    fn test_keeps_most_recent_five() {
        // 7 spikes of 100 among 40 days: p = 0.175, so each spike sits
        // well beyond 2σ while the zero days stay inside it
        let spike_days = [2usize, 7, 13, 19, 24, 30, 36];
        let mut profits = vec![0.0; 40];
        for &d in &spike_days {
            profits[d] = 100.0;
        }
        let history = history_from_profits(date(2024, 1, 1), &profits);

        let anomalies = detect_anomalies(&history);
        assert_eq!(anomalies.len(), MAX_ANOMALIES);

        let expected: Vec<_> = spike_days[2..]
            .iter()
            .map(|&d| date(2024, 1, 1) + chrono::Duration::days(d as i64))
            .collect();
        let actual: Vec<_> = anomalies.iter().map(|a| a.date).collect();
        assert_eq!(actual, expected);
        assert!(anomalies.iter().all(|a| a.kind == AnomalyKind::High));
    }

    #[test]
    fn test_boundary_is_strict() {
        // Values -1, +1 repeated: σ = 1, every deviation is exactly 1 < 2σ
        let history = history_from_profits(date(2024, 1, 1), &[-1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
        assert!(detect_anomalies(&history).is_empty());
    }
}
