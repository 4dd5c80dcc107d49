//! Task/project time entry models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::work_session::MAX_DAY_SECONDS;
use crate::error::{Error, Result};

/// Reject a negative entry duration or one longer than a day
pub fn validate_duration(duration_seconds: i64) -> Result<()> {
    if duration_seconds < 0 {
        return Err(Error::InvalidInput(
            "La durée ne peut pas être négative".to_string(),
        ));
    }
    if duration_seconds > MAX_DAY_SECONDS {
        return Err(Error::InvalidInput(
            "La durée ne peut pas dépasser 24 heures".to_string(),
        ));
    }
    Ok(())
}

/// One timed interval of work on a task or project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub account_id: Uuid,
    pub task_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub duration_seconds: i64,
    pub date: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl TimeEntry {
    /// A freshly started entry: zero duration, no end timestamp
    pub fn start(
        account_id: Uuid,
        task_id: Option<Uuid>,
        project_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            task_id,
            project_id,
            duration_seconds: 0,
            date: now.date_naive(),
            started_at: now,
            ended_at: None,
        }
    }
}

/// Time entry joined with its task/project names
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub entry: TimeEntry,
    pub task_name: Option<String>,
    pub project_name: Option<String>,
}

/// What a time entry is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Task,
    Project,
}

/// Time entry enriched with catalog details, used for statistics and reports.
///
/// An entry referencing a task is classified as a task even when a project is
/// also set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_seconds: i64,
    pub task_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub task_name: Option<String>,
    pub project_name: Option<String>,
    pub activity_name: Option<String>,
    pub activity_type: Option<ActivityKind>,
    pub task_description: Option<String>,
    pub project_description: Option<String>,
    pub project_client: Option<String>,
}

/// Entry in the organization-wide recent activity feed
#[derive(Debug, Clone, Serialize)]
pub struct RecentActivity {
    pub employee_name: String,
    pub activity_name: Option<String>,
    pub duration_seconds: i64,
    pub date: NaiveDate,
    pub started_at: DateTime<Utc>,
}
