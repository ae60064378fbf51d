//! Domain models for arbtrack

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// One day's raw inputs, as collected by the shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyInputs {
    /// Geo label (display only, the calculator uses `deposit_rate`)
    pub geo: String,
    /// What one deposit pays in this geo
    pub deposit_rate: f64,
    pub deposits: u32,
    pub ad_spend: f64,
    pub additional_expenses: f64,
}

impl DailyInputs {
    /// Check the invariants the calculator assumes its caller upholds
    pub fn validate(&self) -> Result<()> {
        if !self.deposit_rate.is_finite() || self.deposit_rate <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "deposit rate must be positive, got {}",
                self.deposit_rate
            )));
        }
        if !self.ad_spend.is_finite() || self.ad_spend < 0.0 {
            return Err(Error::InvalidInput(format!(
                "ad spend must be a non-negative number, got {}",
                self.ad_spend
            )));
        }
        if !self.additional_expenses.is_finite() || self.additional_expenses < 0.0 {
            return Err(Error::InvalidInput(format!(
                "additional expenses must be a non-negative number, got {}",
                self.additional_expenses
            )));
        }
        Ok(())
    }
}

/// Full financial breakdown of one day - the persisted unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBreakdown {
    #[serde(default)]
    pub geo: String,
    pub deposit_rate: f64,
    pub deposits: u32,
    pub ad_spend: f64,
    #[serde(default)]
    pub additional_expenses: f64,
    pub revenue: f64,
    pub total_expenses: f64,
    pub gross_profit: f64,
    pub my_share: f64,
    #[serde(alias = "chatterfy_fee")]
    pub platform_fee: f64,
    pub net_profit: f64,
    pub roi_gross: f64,
    pub roi_net: f64,
    #[serde(rename = "timestamp", deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Accept RFC 3339 timestamps and the naive ISO timestamps of older files
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|dt| dt.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Result of a break-even calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    /// Deposits needed for zero net profit (may be fractional)
    pub deposits_needed: f64,
    pub revenue_needed: f64,
    pub total_expenses: f64,
}

/// Where an actual deposit count sits relative to break-even
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakEvenStatus {
    Above { margin: f64 },
    Below { shortfall: f64 },
}

impl BreakEvenResult {
    pub fn status(&self, deposits: u32) -> BreakEvenStatus {
        let deposits = f64::from(deposits);
        if deposits >= self.deposits_needed {
            BreakEvenStatus::Above {
                margin: deposits - self.deposits_needed,
            }
        } else {
            BreakEvenStatus::Below {
                shortfall: self.deposits_needed - deposits,
            }
        }
    }
}

/// One user's records, sorted ascending by date with one record per date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserHistory {
    records: Vec<(NaiveDate, DailyBreakdown)>,
}

impl UserHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records in any order; a later duplicate date replaces an earlier one
    pub fn from_records(records: impl IntoIterator<Item = (NaiveDate, DailyBreakdown)>) -> Self {
        let mut history = Self::new();
        for (date, record) in records {
            history.upsert(date, record);
        }
        history
    }

    /// Insert or replace the record for `date` (last write wins)
    ///
    /// Returns the replaced record, if any.
    pub fn upsert(&mut self, date: NaiveDate, record: DailyBreakdown) -> Option<DailyBreakdown> {
        match self.records.binary_search_by(|(d, _)| d.cmp(&date)) {
            Ok(idx) => Some(std::mem::replace(&mut self.records[idx].1, record)),
            Err(idx) => {
                self.records.insert(idx, (date, record));
                None
            }
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyBreakdown> {
        self.records
            .binary_search_by(|(d, _)| d.cmp(&date))
            .ok()
            .map(|idx| &self.records[idx].1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[(NaiveDate, DailyBreakdown)] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NaiveDate, DailyBreakdown)> {
        self.records.iter()
    }

    /// The most recent `n` records (all of them if there are fewer)
    pub fn last_n(&self, n: usize) -> &[(NaiveDate, DailyBreakdown)] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Records with `from <= date <= to`
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> &[(NaiveDate, DailyBreakdown)] {
        let start = self.records.partition_point(|(d, _)| *d < from);
        let end = self.records.partition_point(|(d, _)| *d <= to);
        if start >= end {
            &[]
        } else {
            &self.records[start..end]
        }
    }

    pub fn net_profits(&self) -> Vec<f64> {
        self.records.iter().map(|(_, r)| r.net_profit).collect()
    }
}
