//! Organization-wide statistics queries

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_uuid, range_bounds, OptionalExt};
use crate::error::Result;
use crate::stats::{productivity_rate, AccountTotals, DateRange, EmployeeOverview, GlobalStats};

// Per-employee all-time totals. Sums are taken in subqueries so that the
// session and entry joins do not multiply each other.
const OVERVIEW_SQL: &str = "
    SELECT a.id, a.first_name, a.last_name, a.email, a.position,
           COALESCE(ws.days, 0), COALESCE(ws.work, 0), COALESCE(ws.brk, 0), COALESCE(ws.lunch, 0),
           COALESCE(te.entries, 0)
    FROM accounts a
    LEFT JOIN (
        SELECT account_id, COUNT(DISTINCT date) AS days, SUM(work_seconds) AS work,
               SUM(break_seconds) AS brk, SUM(lunch_seconds) AS lunch
        FROM work_sessions GROUP BY account_id
    ) ws ON ws.account_id = a.id
    LEFT JOIN (
        SELECT account_id, COUNT(*) AS entries FROM time_entries GROUP BY account_id
    ) te ON te.account_id = a.id
    WHERE a.role = 'employee' AND a.is_active = 1";

fn overview_from_row(row: &Row<'_>) -> rusqlite::Result<EmployeeOverview> {
    let work: i64 = row.get(6)?;
    let brk: i64 = row.get(7)?;
    let lunch: i64 = row.get(8)?;
    Ok(EmployeeOverview {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        position: row.get(4)?,
        total_days: row.get(5)?,
        total_work_seconds: work,
        total_break_seconds: brk,
        total_lunch_seconds: lunch,
        total_entries: row.get(9)?,
        productivity_rate: productivity_rate(work, brk, lunch),
    })
}

pub struct StatsStore<'a> {
    conn: &'a Connection,
}

impl<'a> StatsStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Active headcount, active catalog sizes and all-time work
    #[instrument(skip(self))]
    pub fn global(&self) -> Result<GlobalStats> {
        let stats = self.conn.query_row(
            "SELECT
                (SELECT COUNT(*) FROM accounts WHERE role = 'employee' AND is_active = 1),
                (SELECT COUNT(*) FROM tasks WHERE is_active = 1),
                (SELECT COUNT(*) FROM projects WHERE is_active = 1),
                (SELECT COALESCE(SUM(work_seconds), 0) FROM work_sessions)",
            [],
            |row| {
                Ok(GlobalStats {
                    total_employees: row.get(0)?,
                    total_tasks: row.get(1)?,
                    total_projects: row.get(2)?,
                    total_work_seconds: row.get(3)?,
                })
            },
        )?;
        Ok(stats)
    }

    /// All-time statistics of every active employee, ordered by name
    #[instrument(skip(self))]
    pub fn employee_overviews(&self) -> Result<Vec<EmployeeOverview>> {
        let sql = format!("{OVERVIEW_SQL} ORDER BY a.last_name, a.first_name");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], overview_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// All-time statistics of one active employee
    #[instrument(skip(self))]
    pub fn employee_overview(&self, id: Uuid) -> Result<Option<EmployeeOverview>> {
        let sql = format!("{OVERVIEW_SQL} AND a.id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![id.to_string()], overview_from_row)
            .optional()?;
        Ok(row)
    }

    /// Windowed totals of every active employee, the team comparison baseline
    #[instrument(skip(self))]
    pub fn team_totals(&self, range: Option<&DateRange>) -> Result<Vec<AccountTotals>> {
        let (start, end) = range_bounds(range);
        let mut stmt = self.conn.prepare(
            "SELECT a.id, COALESCE(ws.work, 0), COALESCE(ws.days, 0), COALESCE(te.entries, 0)
             FROM accounts a
             LEFT JOIN (
                 SELECT account_id, SUM(work_seconds) AS work, COUNT(DISTINCT date) AS days
                 FROM work_sessions
                 WHERE ?1 IS NULL OR date BETWEEN ?1 AND ?2
                 GROUP BY account_id
             ) ws ON ws.account_id = a.id
             LEFT JOIN (
                 SELECT account_id, COUNT(*) AS entries
                 FROM time_entries
                 WHERE ?1 IS NULL OR date BETWEEN ?1 AND ?2
                 GROUP BY account_id
             ) te ON te.account_id = a.id
             WHERE a.role = 'employee' AND a.is_active = 1
             ORDER BY a.id",
        )?;
        let rows = stmt
            .query_map(params![start, end], |row| {
                Ok(AccountTotals {
                    account_id: parse_uuid(&row.get::<_, String>(0)?)?,
                    work_seconds: row.get(1)?,
                    days: row.get(2)?,
                    entries: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}
