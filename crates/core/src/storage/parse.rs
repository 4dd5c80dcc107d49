//! Database value parsing utilities
//!
//! Provides error-safe parsing of stored values.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::Error as SqlError;
use uuid::Uuid;

use crate::models::{AccountRole, ActivityKind};
use crate::stats::DateRange;

/// Storage format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn conversion_error<E>(e: E) -> SqlError
where
    E: std::error::Error + Send + Sync + 'static,
{
    SqlError::FromSqlConversionFailure(0, Type::Text, Box::new(e))
}

/// Parse a UUID from a database string column
pub fn parse_uuid(s: &str) -> Result<Uuid, SqlError> {
    Uuid::parse_str(s).map_err(conversion_error)
}

/// Parse an optional UUID from a database string column
pub fn parse_uuid_opt(s: Option<String>) -> Result<Option<Uuid>, SqlError> {
    s.map(|s| parse_uuid(&s)).transpose()
}

/// Parse a DateTime from an RFC3339 string
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, SqlError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(conversion_error)
}

/// Parse an optional DateTime from an RFC3339 string
pub fn parse_datetime_opt(s: Option<String>) -> Result<Option<DateTime<Utc>>, SqlError> {
    s.map(|s| parse_datetime(&s)).transpose()
}

/// Parse a calendar date stored as `YYYY-MM-DD`
pub fn parse_date(s: &str) -> Result<NaiveDate, SqlError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(conversion_error)
}

/// Format a calendar date for storage
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Convert a stored role name to AccountRole
pub fn parse_role(s: &str) -> Result<AccountRole, SqlError> {
    AccountRole::from_str(s).ok_or_else(|| {
        SqlError::FromSqlConversionFailure(0, Type::Text, format!("unknown role: {s}").into())
    })
}

/// Classify a time entry by the references it carries
pub fn activity_kind(task_id: Option<Uuid>, project_id: Option<Uuid>) -> Option<ActivityKind> {
    match (task_id, project_id) {
        (Some(_), _) => Some(ActivityKind::Task),
        (None, Some(_)) => Some(ActivityKind::Project),
        (None, None) => None,
    }
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// True when the error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &SqlError) -> bool {
    matches!(
        err,
        SqlError::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Bind values for an optional inclusive date window.
///
/// Queries filter with `(?N IS NULL OR date BETWEEN ?N AND ?M)`.
pub fn range_bounds(range: Option<&DateRange>) -> (Option<String>, Option<String>) {
    match range {
        Some(r) => (Some(format_date(r.start)), Some(format_date(r.end))),
        None => (None, None),
    }
}
