//! Report Formatter
//!
//! Turns an account's aggregates into a Markdown document in French, ready to
//! be submitted to the document generation service. Optional sections are
//! emitted only when their detail rows were requested and are non-empty.
//! Output depends only on the inputs, the generation instant included.

mod commentary;
mod sections;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::{Account, ActivityRecord};
use crate::stats::{activity_ranking, AccountSummary, DetailBundle, RankedActivity};

pub use commentary::{Concentration, Consistency, ProductivityLevel, WorkBalance};

/// A renderable activity report
pub struct Report<'a> {
    pub account: &'a Account,
    pub summary: &'a AccountSummary,
    pub ranking: Vec<RankedActivity>,
    pub details: Option<&'a DetailBundle>,
    pub generated_at: DateTime<Utc>,
}

impl<'a> Report<'a> {
    pub fn new(
        account: &'a Account,
        summary: &'a AccountSummary,
        activities: &[ActivityRecord],
        details: Option<&'a DetailBundle>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            account,
            summary,
            ranking: activity_ranking(activities),
            details,
            generated_at,
        }
    }

    fn long_date(&self) -> String {
        sections::long_french_date(self.generated_at)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        sections::summary(f, self)?;
        sections::productivity(f, self)?;
        sections::time_of_day(f, self)?;
        sections::time_allocation(f, self)?;
        sections::weekdays(f, self)?;
        sections::daily_trend(f, self)?;
        sections::activity_ranking(f, self)?;
        sections::project_details(f, self)?;
        sections::task_details(f, self)?;
        sections::team(f, self)?;
        sections::recommendations(f, self)?;
        sections::conclusion(f, self)
    }
}

/// Render the report document for one account
pub fn render_report(
    account: &Account,
    summary: &AccountSummary,
    activities: &[ActivityRecord],
    details: Option<&DetailBundle>,
    generated_at: DateTime<Utc>,
) -> String {
    Report::new(account, summary, activities, details, generated_at).to_string()
}
