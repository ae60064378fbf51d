//! Number and date rendering shared by the engine and the CLI

use chrono::NaiveDate;

/// `$12.34`, with the sign in front of the currency symbol
pub fn usd(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// `$12.34 (6355 ₸)`
pub fn usd_with_kzt(amount: f64, usd_to_kzt: f64) -> String {
    format!("{} ({:.0} ₸)", usd(amount), amount * usd_to_kzt)
}

/// Day-first date used in all user-facing output
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Mean of a slice, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation (divides by n), 0 for an empty slice
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Status marker for a profit value
pub fn profit_marker(amount: f64) -> &'static str {
    if amount > 0.0 {
        "🟢"
    } else if amount < 0.0 {
        "🔴"
    } else {
        "🟡"
    }
}
