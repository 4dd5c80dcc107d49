//! Statistics Aggregator
//!
//! Pure computations over stored time records. Every aggregate is a function
//! of the rows matching an (account, date window) filter; numeric fields are
//! zero, never absent, when the row set is empty.

mod aggregate;
mod bundle;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};

pub use aggregate::*;
pub use bundle::*;

/// Inclusive calendar window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidInput(format!(
                "La date de début ({start}) est postérieure à la date de fin ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a window from optional `YYYY-MM-DD` bounds.
    ///
    /// The window applies only when both bounds are given.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>> {
        match (start, end) {
            (Some(start), Some(end)) => {
                let start = parse_bound(start)?;
                let end = parse_bound(end)?;
                Self::new(start, end).map(Some)
            }
            _ => Ok(None),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, bounds included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

fn parse_bound(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidInput(format!("Date invalide : {value}")))
}
