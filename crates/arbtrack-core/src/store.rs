//! Per-user daily record storage
//!
//! The analytics engine only ever sees a loaded [`UserHistory`]; where it
//! comes from is behind [`RecordStore`]. [`MemoryStore`] is used for tests
//! and fixtures, [`Database`](crate::db::Database) for the CLI.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard};

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{DailyBreakdown, UserHistory};

/// Storage contract for daily records, keyed per user and date
///
/// Implementations serialize reads and writes per user so a `load` never
/// observes a partially written record.
pub trait RecordStore {
    /// Full history for a user, oldest first (empty if the user is unknown)
    fn load(&self, user_id: &str) -> Result<UserHistory>;

    /// Insert or replace the record for `date` (last write wins)
    fn upsert(&self, user_id: &str, date: NaiveDate, record: &DailyBreakdown) -> Result<()>;

    /// Single record lookup
    fn get(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyBreakdown>> {
        Ok(self.load(user_id)?.get(date).cloned())
    }
}

type UserRecords = HashMap<String, BTreeMap<NaiveDate, DailyBreakdown>>;

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<UserRecords>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, UserRecords>> {
        self.users
            .read()
            .map_err(|_| Error::InvalidData("record store lock poisoned".to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, user_id: &str) -> Result<UserHistory> {
        let users = self.read()?;
        Ok(users
            .get(user_id)
            .map(|records| {
                UserHistory::from_records(records.iter().map(|(d, r)| (*d, r.clone())))
            })
            .unwrap_or_default())
    }

    fn upsert(&self, user_id: &str, date: NaiveDate, record: &DailyBreakdown) -> Result<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| Error::InvalidData("record store lock poisoned".to_string()))?;
        users
            .entry(user_id.to_string())
            .or_default()
            .insert(date, record.clone());
        Ok(())
    }

    fn get(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyBreakdown>> {
        Ok(self
            .read()?
            .get(user_id)
            .and_then(|records| records.get(&date))
            .cloned())
    }
}
