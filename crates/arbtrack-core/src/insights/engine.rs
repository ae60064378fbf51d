//! Insight Engine - runs every history analyzer and bundles the results

use serde::{Deserialize, Serialize};

use crate::models::UserHistory;

use super::types::{Anomaly, BudgetSuggestion, MonthlyForecast, PatternInsight};
use super::{analyze_patterns, detect_anomalies, predict_monthly_profit, suggest_optimal_budget};

/// Everything the analysis screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Number of recorded days the report was built from
    pub days: usize,
    pub patterns: Vec<PatternInsight>,
    pub anomalies: Vec<Anomaly>,
    pub forecast: MonthlyForecast,
    pub budget: BudgetSuggestion,
}

/// Stateless orchestrator over the analyzers
#[derive(Debug, Default, Clone, Copy)]
pub struct InsightEngine;

impl InsightEngine {
    /// Below this many days the shell shows "analysis unavailable" instead
    pub const MIN_HISTORY_DAYS: usize = 3;

    pub fn new() -> Self {
        Self
    }

    /// Whether the history is long enough to be worth analyzing
    pub fn is_ready(&self, history: &UserHistory) -> bool {
        history.len() >= Self::MIN_HISTORY_DAYS
    }

    /// Run all analyzers over one consistent snapshot
    pub fn analyze(&self, history: &UserHistory) -> AnalysisReport {
        let patterns = analyze_patterns(history);
        tracing::debug!(
            analyzer = "patterns",
            count = patterns.len(),
            "Analysis complete"
        );

        let anomalies = detect_anomalies(history);
        tracing::debug!(
            analyzer = "anomalies",
            count = anomalies.len(),
            "Analysis complete"
        );

        let forecast = predict_monthly_profit(history);
        tracing::debug!(analyzer = "forecast", result = ?forecast, "Analysis complete");

        let budget = suggest_optimal_budget(history);
        tracing::debug!(analyzer = "budget", result = ?budget, "Analysis complete");

        AnalysisReport {
            days: history.len(),
            patterns,
            anomalies,
            forecast,
            budget,
        }
    }
}
