//! Time entry storage

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{
    activity_kind, format_date, parse_date, parse_datetime, parse_datetime_opt, parse_uuid,
    parse_uuid_opt, range_bounds,
};
use crate::error::Result;
use crate::models::{ActivityRecord, HistoryEntry, RecentActivity, TimeEntry};
use crate::stats::DateRange;

/// Default number of entries returned by `history`
pub const HISTORY_LIMIT: u32 = 50;

/// Number of entries in the recent activity feed
pub const RECENT_ACTIVITY_LIMIT: u32 = 20;

const ENTRY_COLUMNS: &str = "te.id, te.account_id, te.task_id, te.project_id, te.duration_seconds, te.date, te.started_at, te.ended_at";

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<TimeEntry> {
    Ok(TimeEntry {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        account_id: parse_uuid(&row.get::<_, String>(1)?)?,
        task_id: parse_uuid_opt(row.get(2)?)?,
        project_id: parse_uuid_opt(row.get(3)?)?,
        duration_seconds: row.get(4)?,
        date: parse_date(&row.get::<_, String>(5)?)?,
        started_at: parse_datetime(&row.get::<_, String>(6)?)?,
        ended_at: parse_datetime_opt(row.get(7)?)?,
    })
}

pub struct TimeEntryStore<'a> {
    conn: &'a Connection,
}

impl<'a> TimeEntryStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new entry
    #[instrument(skip(self, entry), fields(entry_id = %entry.id, account_id = %entry.account_id))]
    pub fn create(&self, entry: &TimeEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO time_entries (id, account_id, task_id, project_id, duration_seconds, date, started_at, ended_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                entry.id.to_string(),
                entry.account_id.to_string(),
                entry.task_id.map(|id| id.to_string()),
                entry.project_id.map(|id| id.to_string()),
                entry.duration_seconds,
                format_date(entry.date),
                entry.started_at.to_rfc3339(),
                entry.ended_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Set the final duration and end timestamp of an entry owned by the account.
    ///
    /// Returns whether a row matched; a miss is not an error.
    #[instrument(skip(self))]
    pub fn complete(
        &self,
        account_id: Uuid,
        entry_id: Uuid,
        duration_seconds: i64,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE time_entries SET duration_seconds = ?1, ended_at = ?2
             WHERE id = ?3 AND account_id = ?4",
            params![
                duration_seconds,
                now.to_rfc3339(),
                entry_id.to_string(),
                account_id.to_string(),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Most recent entries of an account with task/project names, newest first
    #[instrument(skip(self))]
    pub fn history(&self, account_id: Uuid, limit: u32) -> Result<Vec<HistoryEntry>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS}, t.name, p.name
             FROM time_entries te
             LEFT JOIN tasks t ON te.task_id = t.id
             LEFT JOIN projects p ON te.project_id = p.id
             WHERE te.account_id = ?1
             ORDER BY te.date DESC, te.started_at DESC
             LIMIT ?2"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let entries = stmt
            .query_map(params![account_id.to_string(), limit], |row| {
                Ok(HistoryEntry {
                    entry: entry_from_row(row)?,
                    task_name: row.get(8)?,
                    project_name: row.get(9)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Entries of an account within the window, enriched with catalog details,
    /// newest first
    #[instrument(skip(self))]
    pub fn activities(
        &self,
        account_id: Uuid,
        range: Option<&DateRange>,
    ) -> Result<Vec<ActivityRecord>> {
        let (start, end) = range_bounds(range);
        let mut stmt = self.conn.prepare(
            "SELECT te.id, te.date, te.started_at, te.ended_at, te.duration_seconds,
                    te.task_id, te.project_id,
                    t.name, p.name,
                    t.description, p.description, p.client
             FROM time_entries te
             LEFT JOIN tasks t ON te.task_id = t.id
             LEFT JOIN projects p ON te.project_id = p.id
             WHERE te.account_id = ?1 AND (?2 IS NULL OR te.date BETWEEN ?2 AND ?3)
             ORDER BY te.started_at DESC",
        )?;
        let records = stmt
            .query_map(params![account_id.to_string(), start, end], |row| {
                let task_id = parse_uuid_opt(row.get(5)?)?;
                let project_id = parse_uuid_opt(row.get(6)?)?;
                let task_name: Option<String> = row.get(7)?;
                let project_name: Option<String> = row.get(8)?;
                Ok(ActivityRecord {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    date: parse_date(&row.get::<_, String>(1)?)?,
                    started_at: parse_datetime(&row.get::<_, String>(2)?)?,
                    ended_at: parse_datetime_opt(row.get(3)?)?,
                    duration_seconds: row.get(4)?,
                    task_id,
                    project_id,
                    activity_name: task_name.clone().or_else(|| project_name.clone()),
                    activity_type: activity_kind(task_id, project_id),
                    task_name,
                    project_name,
                    task_description: row.get(9)?,
                    project_description: row.get(10)?,
                    project_client: row.get(11)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Newest entries across all accounts
    #[instrument(skip(self))]
    pub fn recent(&self, limit: u32) -> Result<Vec<RecentActivity>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.first_name || ' ' || a.last_name,
                    COALESCE(t.name, p.name),
                    te.duration_seconds, te.date, te.started_at
             FROM time_entries te
             JOIN accounts a ON te.account_id = a.id
             LEFT JOIN tasks t ON te.task_id = t.id
             LEFT JOIN projects p ON te.project_id = p.id
             ORDER BY te.started_at DESC
             LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok(RecentActivity {
                    employee_name: row.get(0)?,
                    activity_name: row.get(1)?,
                    duration_seconds: row.get(2)?,
                    date: parse_date(&row.get::<_, String>(3)?)?,
                    started_at: parse_datetime(&row.get::<_, String>(4)?)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}
