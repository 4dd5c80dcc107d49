//! Daily work session storage

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{
    format_date, parse_date, parse_datetime_opt, parse_uuid, range_bounds, OptionalExt,
};
use crate::error::Result;
use crate::models::{DayCounters, WorkSession};
use crate::stats::DateRange;

const SESSION_COLUMNS: &str =
    "id, account_id, date, work_seconds, break_seconds, lunch_seconds, start_time, end_time";

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<WorkSession> {
    Ok(WorkSession {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        account_id: parse_uuid(&row.get::<_, String>(1)?)?,
        date: parse_date(&row.get::<_, String>(2)?)?,
        counters: DayCounters {
            work_seconds: row.get(3)?,
            break_seconds: row.get(4)?,
            lunch_seconds: row.get(5)?,
        },
        start_time: parse_datetime_opt(row.get::<_, Option<String>>(6)?)?,
        end_time: parse_datetime_opt(row.get::<_, Option<String>>(7)?)?,
    })
}

pub struct WorkSessionStore<'a> {
    conn: &'a Connection,
}

impl<'a> WorkSessionStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Session row for one account and day
    #[instrument(skip(self))]
    pub fn get(&self, account_id: Uuid, date: NaiveDate) -> Result<Option<WorkSession>> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM work_sessions WHERE account_id = ?1 AND date = ?2");
        let session = self
            .conn
            .query_row(
                &sql,
                params![account_id.to_string(), format_date(date)],
                session_from_row,
            )
            .optional()?;
        Ok(session)
    }

    /// Insert or overwrite the counters for one account and day.
    ///
    /// The first write stamps `start_time`; later writes replace the counters
    /// and leave `start_time` alone. Counters are running totals.
    #[instrument(skip(self, counters))]
    pub fn upsert(
        &self,
        account_id: Uuid,
        date: NaiveDate,
        counters: DayCounters,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO work_sessions (id, account_id, date, work_seconds, break_seconds, lunch_seconds, start_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(account_id, date) DO UPDATE SET
                work_seconds = excluded.work_seconds,
                break_seconds = excluded.break_seconds,
                lunch_seconds = excluded.lunch_seconds",
            params![
                Uuid::new_v4().to_string(),
                account_id.to_string(),
                format_date(date),
                counters.work_seconds,
                counters.break_seconds,
                counters.lunch_seconds,
                now.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Stamp `end_time` on the day's row.
    ///
    /// Does not create a row when none exists; returns whether one was updated.
    #[instrument(skip(self))]
    pub fn end_day(&self, account_id: Uuid, date: NaiveDate, now: DateTime<Utc>) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE work_sessions SET end_time = ?1 WHERE account_id = ?2 AND date = ?3",
            params![now.to_rfc3339(), account_id.to_string(), format_date(date)],
        )?;
        Ok(changed > 0)
    }

    /// All rows for an account within the window, newest first
    #[instrument(skip(self))]
    pub fn list_for_account(
        &self,
        account_id: Uuid,
        range: Option<&DateRange>,
    ) -> Result<Vec<WorkSession>> {
        let (start, end) = range_bounds(range);
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM work_sessions
             WHERE account_id = ?1 AND (?2 IS NULL OR date BETWEEN ?2 AND ?3)
             ORDER BY date DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let sessions = stmt
            .query_map(params![account_id.to_string(), start, end], session_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sessions)
    }
}
