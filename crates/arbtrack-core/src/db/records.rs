//! Daily record database operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{DailyBreakdown, UserHistory};
use crate::store::RecordStore;

const RECORD_COLUMNS: &str = "date, geo, deposit_rate, deposits, ad_spend, additional_expenses, \
     revenue, total_expenses, gross_profit, my_share, platform_fee, net_profit, \
     roi_gross, roi_net, created_at";

impl Database {
    /// Insert or replace the record for (user, date)
    pub fn upsert_daily_record(
        &self,
        user_id: &str,
        date: NaiveDate,
        record: &DailyBreakdown,
    ) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO daily_records (
                user_id, date, geo, deposit_rate, deposits, ad_spend, additional_expenses,
                revenue, total_expenses, gross_profit, my_share, platform_fee, net_profit,
                roi_gross, roi_net, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            ON CONFLICT(user_id, date) DO UPDATE SET
                geo = excluded.geo,
                deposit_rate = excluded.deposit_rate,
                deposits = excluded.deposits,
                ad_spend = excluded.ad_spend,
                additional_expenses = excluded.additional_expenses,
                revenue = excluded.revenue,
                total_expenses = excluded.total_expenses,
                gross_profit = excluded.gross_profit,
                my_share = excluded.my_share,
                platform_fee = excluded.platform_fee,
                net_profit = excluded.net_profit,
                roi_gross = excluded.roi_gross,
                roi_net = excluded.roi_net,
                created_at = excluded.created_at,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![
                user_id,
                date.to_string(),
                record.geo,
                record.deposit_rate,
                record.deposits,
                record.ad_spend,
                record.additional_expenses,
                record.revenue,
                record.total_expenses,
                record.gross_profit,
                record.my_share,
                record.platform_fee,
                record.net_profit,
                record.roi_gross,
                record.roi_net,
                record.created_at.to_rfc3339(),
            ],
        )?;

        info!(user = user_id, date = %date, net_profit = record.net_profit, "Saved daily record");
        Ok(())
    }

    /// Full history for a user, oldest first
    pub fn list_daily_records(&self, user_id: &str) -> Result<UserHistory> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM daily_records WHERE user_id = ? ORDER BY date ASC",
            RECORD_COLUMNS
        ))?;

        let records = stmt
            .query_map(params![user_id], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(UserHistory::from_records(records))
    }

    /// One user's record for a date
    pub fn get_daily_record(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyBreakdown>> {
        let conn = self.conn()?;

        let record = conn
            .query_row(
                &format!(
                    "SELECT {} FROM daily_records WHERE user_id = ? AND date = ?",
                    RECORD_COLUMNS
                ),
                params![user_id, date.to_string()],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record.map(|(_, r)| r))
    }

    /// Users with at least one record, alphabetically
    pub fn list_users(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT DISTINCT user_id FROM daily_records ORDER BY user_id")?;
        let users = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(users)
    }

    /// Number of days recorded for a user
    pub fn count_daily_records(&self, user_id: &str) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM daily_records WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn row_to_record(row: &Row) -> rusqlite::Result<(NaiveDate, DailyBreakdown)> {
        let date_str: String = row.get(0)?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let created_at: String = row.get(14)?;

        Ok((
            date,
            DailyBreakdown {
                geo: row.get(1)?,
                deposit_rate: row.get(2)?,
                deposits: row.get(3)?,
                ad_spend: row.get(4)?,
                additional_expenses: row.get(5)?,
                revenue: row.get(6)?,
                total_expenses: row.get(7)?,
                gross_profit: row.get(8)?,
                my_share: row.get(9)?,
                platform_fee: row.get(10)?,
                net_profit: row.get(11)?,
                roi_gross: row.get(12)?,
                roi_net: row.get(13)?,
                created_at: parse_datetime(&created_at),
            },
        ))
    }
}

impl RecordStore for Database {
    fn load(&self, user_id: &str) -> Result<UserHistory> {
        self.list_daily_records(user_id)
    }

    fn upsert(&self, user_id: &str, date: NaiveDate, record: &DailyBreakdown) -> Result<()> {
        self.upsert_daily_record(user_id, date, record)
    }

    fn get(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyBreakdown>> {
        self.get_daily_record(user_id, date)
    }
}
