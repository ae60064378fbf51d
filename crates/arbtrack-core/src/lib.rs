//! arbtrack Core Library
//!
//! Shared functionality for the arbtrack ad-arbitrage tracker:
//! - Profit and break-even calculator
//! - Day entry workflow with recommendations
//! - Per-user daily history storage (SQLite, in-memory)
//! - History analytics: patterns, anomalies, forecasts, recommendations
//! - Period reports and JSON/CSV history exchange

pub mod calculator;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod format;
pub mod insights;
pub mod models;
pub mod reports;
pub mod store;
pub mod tracker;

/// History builders shared by unit and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use calculator::{ProfitBreakdown, ProfitCalculator};
pub use config::{EngineConfig, GeoRate};
pub use db::Database;
pub use error::{Error, Result};
pub use export::{ExportFormat, ImportSummary};
pub use insights::{AnalysisReport, InsightEngine, Recommendation, Severity};
pub use models::{BreakEvenResult, BreakEvenStatus, DailyBreakdown, DailyInputs, UserHistory};
pub use reports::{PeriodComparison, PeriodSummary, ReportPeriod, TopDays};
pub use store::{MemoryStore, RecordStore};
pub use tracker::{record_day, recommend_for_day, RecordedDay};
