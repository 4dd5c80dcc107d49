//! Daily work session model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Upper bound for a single daily counter or entry duration
pub const MAX_DAY_SECONDS: i64 = 86_400;

/// Running work/break/lunch totals for one day, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounters {
    pub work_seconds: i64,
    pub break_seconds: i64,
    pub lunch_seconds: i64,
}

impl DayCounters {
    pub fn new(work_seconds: i64, break_seconds: i64, lunch_seconds: i64) -> Self {
        Self {
            work_seconds,
            break_seconds,
            lunch_seconds,
        }
    }

    /// Reject negative counters and counters longer than a day
    pub fn validate(&self) -> Result<()> {
        let counters = [self.work_seconds, self.break_seconds, self.lunch_seconds];
        if counters.iter().any(|&c| c < 0) {
            return Err(Error::InvalidInput(
                "Les compteurs ne peuvent pas être négatifs".to_string(),
            ));
        }
        if counters.iter().any(|&c| c > MAX_DAY_SECONDS) {
            return Err(Error::InvalidInput(
                "Les compteurs ne peuvent pas dépasser 24 heures".to_string(),
            ));
        }
        Ok(())
    }
}

/// One calendar day of tracked time for an account.
///
/// At most one row exists per (account, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSession {
    pub id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub counters: DayCounters,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}
