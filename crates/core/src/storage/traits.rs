//! Storage repository traits
//!
//! These traits define the storage interface at the account and
//! time-tracking seams, allowing for different implementations (SQLite, mock).

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Account, AuthSession, DayCounters, HistoryEntry, TimeEntry, WorkSession};

/// Account and auth session operations
pub trait AccountRepository {
    /// Create a new account
    fn create_account(&self, account: &Account) -> Result<()>;

    /// Find account by ID
    fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Find an active account by email
    fn find_active_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Update account's last login time
    fn update_last_login(&self, account_id: Uuid) -> Result<()>;

    /// Create a session
    fn create_session(&self, session: &AuthSession) -> Result<()>;

    /// Find a valid (non-expired) session
    fn find_valid_session(&self, token: &str) -> Result<Option<AuthSession>>;

    /// Delete a session
    fn delete_session(&self, token: &str) -> Result<()>;

    /// Delete all sessions for an account
    fn delete_account_sessions(&self, account_id: Uuid) -> Result<()>;

    /// Clean up expired sessions
    fn cleanup_expired_sessions(&self) -> Result<u64>;
}

/// Daily counters and time entry operations
pub trait TimeTrackingRepository {
    /// Session row for one day
    fn day_session(&self, account_id: Uuid, date: NaiveDate) -> Result<Option<WorkSession>>;

    /// Overwrite the day's running totals
    fn save_day_counters(
        &self,
        account_id: Uuid,
        date: NaiveDate,
        counters: DayCounters,
        now: DateTime<Utc>,
    ) -> Result<()>;

    /// Stamp the end of the day, if a row exists
    fn end_day(&self, account_id: Uuid, date: NaiveDate, now: DateTime<Utc>) -> Result<bool>;

    /// Record a started entry
    fn start_entry(&self, entry: &TimeEntry) -> Result<()>;

    /// Set the final duration of an entry owned by the account
    fn complete_entry(
        &self,
        account_id: Uuid,
        entry_id: Uuid,
        duration_seconds: i64,
        now: DateTime<Utc>,
    ) -> Result<bool>;

    /// Most recent entries, newest first
    fn entry_history(&self, account_id: Uuid, limit: u32) -> Result<Vec<HistoryEntry>>;
}

/// Combined storage interface
pub trait Storage: AccountRepository + TimeTrackingRepository {}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where T: AccountRepository + TimeTrackingRepository {}
