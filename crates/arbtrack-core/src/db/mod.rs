//! SQLite record store with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `records` - Daily record upsert and history queries

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{info, warn};

use crate::error::Result;

mod records;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a stored timestamp into a DateTime<Utc>
///
/// Accepts RFC 3339 (what this crate writes) and SQLite's
/// "YYYY-MM-DD HH:MM:SS"; anything else is logged and falls back to now.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|e| {
            warn!(value = s, error = %e, "Unreadable stored timestamp, using current time");
            Utc::now()
        })
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (or create) the database at `path` and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self { pool };
        db.run_migrations()?;

        Ok(db)
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "arbtrack_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the single writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- One row per user per calendar date; re-entering a date replaces it
            CREATE TABLE IF NOT EXISTS daily_records (
                user_id TEXT NOT NULL,
                date DATE NOT NULL,                        -- YYYY-MM-DD
                geo TEXT NOT NULL DEFAULT '',
                deposit_rate REAL NOT NULL,
                deposits INTEGER NOT NULL,
                ad_spend REAL NOT NULL,
                additional_expenses REAL NOT NULL DEFAULT 0,
                revenue REAL NOT NULL,
                total_expenses REAL NOT NULL,
                gross_profit REAL NOT NULL,
                my_share REAL NOT NULL,
                platform_fee REAL NOT NULL,
                net_profit REAL NOT NULL,
                roi_gross REAL NOT NULL,
                roi_net REAL NOT NULL,
                created_at TEXT NOT NULL,                  -- RFC 3339
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (user_id, date)
            );

            CREATE INDEX IF NOT EXISTS idx_daily_records_date ON daily_records(date);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}
