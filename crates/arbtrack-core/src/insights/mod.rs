//! History Analytics Engine
//!
//! Pure functions over an already loaded [`UserHistory`](crate::models::UserHistory).
//! None of them mutate the history or fail; short histories yield explicit
//! "insufficient data" variants instead.
//!
//! ## Analyzers
//!
//! - **Patterns** - best/worst weekday, recent trend, success rate (≥3 days)
//! - **Anomalies** - days more than 2σ from the mean profit (≥5 days)
//! - **Forecast** - last week's average profit projected over 30 days (≥7 days)
//! - **Budget** - average spend of high-ROI days (≥5 days)
//! - **Recommendations** - advice for the day just entered (any history)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use arbtrack_core::insights::InsightEngine;
//!
//! let history = store.load("me")?;
//! let report = InsightEngine::new().analyze(&history);
//! ```

pub mod anomalies;
pub mod engine;
pub mod forecast;
pub mod patterns;
pub mod recommendations;
pub mod types;

pub use anomalies::detect_anomalies;
pub use engine::{AnalysisReport, InsightEngine};
pub use forecast::{predict_monthly_profit, suggest_optimal_budget};
pub use patterns::analyze_patterns;
pub use recommendations::recommend;
pub use types::{
    weekday_name, Anomaly, AnomalyKind, BudgetSuggestion, MonthlyForecast, PatternInsight,
    Recommendation, Severity, TrendDirection,
};
