//! SQLite storage layer

mod accounts;
mod catalog;
mod migrations;
mod parse;
mod stats;
mod time_entries;
mod traits;
mod work_sessions;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Account, AuthSession, DayCounters, HistoryEntry, TimeEntry, WorkSession};

pub use accounts::AccountStore;
pub use catalog::CatalogStore;
pub use parse::DATE_FORMAT;
pub use stats::StatsStore;
pub use time_entries::{TimeEntryStore, HISTORY_LIMIT, RECENT_ACTIVITY_LIMIT};
pub use traits::{AccountRepository, Storage, TimeTrackingRepository};
pub use work_sessions::WorkSessionStore;

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    /// Accounts and auth sessions
    pub fn accounts(&self) -> AccountStore<'_> {
        AccountStore::new(&self.conn)
    }

    /// Task and project catalog
    pub fn catalog(&self) -> CatalogStore<'_> {
        CatalogStore::new(&self.conn)
    }

    /// Daily work/break/lunch counters
    pub fn work_sessions(&self) -> WorkSessionStore<'_> {
        WorkSessionStore::new(&self.conn)
    }

    /// Task/project time entries
    pub fn time_entries(&self) -> TimeEntryStore<'_> {
        TimeEntryStore::new(&self.conn)
    }

    /// Organization-wide statistics
    pub fn stats(&self) -> StatsStore<'_> {
        StatsStore::new(&self.conn)
    }
}

// Implement repository traits for Database
// This enables using Database through the trait interface

impl AccountRepository for Database {
    fn create_account(&self, account: &Account) -> Result<()> {
        self.accounts().create(account)
    }

    fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        self.accounts().find_by_id(id)
    }

    fn find_active_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.accounts().find_active_by_email(email)
    }

    fn update_last_login(&self, account_id: Uuid) -> Result<()> {
        self.accounts().update_last_login(account_id)
    }

    fn create_session(&self, session: &AuthSession) -> Result<()> {
        self.accounts().create_session(session)
    }

    fn find_valid_session(&self, token: &str) -> Result<Option<AuthSession>> {
        self.accounts().find_valid_session(token)
    }

    fn delete_session(&self, token: &str) -> Result<()> {
        self.accounts().delete_session(token)
    }

    fn delete_account_sessions(&self, account_id: Uuid) -> Result<()> {
        self.accounts().delete_account_sessions(account_id)
    }

    fn cleanup_expired_sessions(&self) -> Result<u64> {
        self.accounts().cleanup_expired_sessions()
    }
}

impl TimeTrackingRepository for Database {
    fn day_session(&self, account_id: Uuid, date: NaiveDate) -> Result<Option<WorkSession>> {
        self.work_sessions().get(account_id, date)
    }

    fn save_day_counters(
        &self,
        account_id: Uuid,
        date: NaiveDate,
        counters: DayCounters,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.work_sessions().upsert(account_id, date, counters, now)
    }

    fn end_day(&self, account_id: Uuid, date: NaiveDate, now: DateTime<Utc>) -> Result<bool> {
        self.work_sessions().end_day(account_id, date, now)
    }

    fn start_entry(&self, entry: &TimeEntry) -> Result<()> {
        self.time_entries().create(entry)
    }

    fn complete_entry(
        &self,
        account_id: Uuid,
        entry_id: Uuid,
        duration_seconds: i64,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        self.time_entries()
            .complete(account_id, entry_id, duration_seconds, now)
    }

    fn entry_history(&self, account_id: Uuid, limit: u32) -> Result<Vec<HistoryEntry>> {
        self.time_entries().history(account_id, limit)
    }
}
