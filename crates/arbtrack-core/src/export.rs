//! History exchange: the date-keyed JSON file and a flat CSV export
//!
//! The JSON layout is one object per user mapping `"YYYY-MM-DD"` to a record:
//!
//! ```json
//! { "2024-01-15": { "geo": "Philippines", "deposits": 12, "net_profit": 41.5, ... } }
//! ```
//!
//! Records written by older versions may carry `chatterfy_fee` instead of
//! `platform_fee` and a naive timestamp; both are accepted on import.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::{DailyBreakdown, UserHistory};
use crate::store::RecordStore;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(Error::InvalidInput(format!(
                "Unknown export format: {} (expected json or csv)",
                other
            ))),
        }
    }
}

/// Outcome of parsing a history file
#[derive(Debug, Default)]
pub struct ParsedHistory {
    pub records: Vec<(NaiveDate, DailyBreakdown)>,
    /// Keys that were not a date or held an unreadable record
    pub skipped: Vec<String>,
}

/// Result of importing a history file into a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Parse a date-keyed history document
///
/// The document itself must be a JSON object; individual bad entries are
/// skipped and reported rather than failing the whole import.
pub fn parse_history_json(content: &str) -> Result<ParsedHistory> {
    let root: serde_json::Value = serde_json::from_str(content)?;
    let entries = root.as_object().ok_or_else(|| {
        Error::InvalidData("history file must be a JSON object keyed by date".to_string())
    })?;

    let mut parsed = ParsedHistory::default();
    for (key, value) in entries {
        let date = match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                warn!(key = %key, error = %e, "Skipping entry with invalid date key");
                parsed.skipped.push(key.clone());
                continue;
            }
        };

        match serde_json::from_value::<DailyBreakdown>(value.clone()) {
            Ok(record) => parsed.records.push((date, record)),
            Err(e) => {
                warn!(date = %key, error = %e, "Skipping unreadable record");
                parsed.skipped.push(key.clone());
            }
        }
    }

    parsed.records.sort_by_key(|(d, _)| *d);
    Ok(parsed)
}

/// Read a history file and upsert every valid record for `user_id`
pub fn import_history_file(
    store: &dyn RecordStore,
    user_id: &str,
    path: &Path,
) -> Result<ImportSummary> {
    let content = std::fs::read_to_string(path)?;
    let parsed = parse_history_json(&content)?;

    for (date, record) in &parsed.records {
        store.upsert(user_id, *date, record)?;
    }

    let summary = ImportSummary {
        imported: parsed.records.len(),
        skipped: parsed.skipped.len(),
    };
    info!(
        user = user_id,
        file = %path.display(),
        imported = summary.imported,
        skipped = summary.skipped,
        "Imported history"
    );
    Ok(summary)
}

/// Render a history as the date-keyed JSON document
pub fn export_json(history: &UserHistory) -> Result<String> {
    let map: BTreeMap<String, &DailyBreakdown> = history
        .iter()
        .map(|(date, record)| (date.to_string(), record))
        .collect();
    Ok(serde_json::to_string_pretty(&map)?)
}

/// Render a history as CSV, one row per day
pub fn export_csv(history: &UserHistory) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "date",
        "geo",
        "deposit_rate",
        "deposits",
        "ad_spend",
        "additional_expenses",
        "revenue",
        "total_expenses",
        "gross_profit",
        "my_share",
        "platform_fee",
        "net_profit",
        "roi_gross",
        "roi_net",
        "timestamp",
    ])?;

    for (date, r) in history.iter() {
        writer.write_record([
            date.to_string(),
            r.geo.clone(),
            r.deposit_rate.to_string(),
            r.deposits.to_string(),
            format!("{:.2}", r.ad_spend),
            format!("{:.2}", r.additional_expenses),
            format!("{:.2}", r.revenue),
            format!("{:.2}", r.total_expenses),
            format!("{:.2}", r.gross_profit),
            format!("{:.2}", r.my_share),
            format!("{:.2}", r.platform_fee),
            format!("{:.2}", r.net_profit),
            format!("{:.2}", r.roi_gross),
            format!("{:.2}", r.roi_net),
            r.created_at.to_rfc3339(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::InvalidData(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(e.to_string()))
}

/// Render a history in the requested format
pub fn export_history(history: &UserHistory, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => export_json(history),
        ExportFormat::Csv => export_csv(history),
    }
}

/// Write `contents` to `path` via a sibling temp file, so readers never see
/// a half-written export
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
