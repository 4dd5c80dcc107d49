//! Aggregate bundles shared by the detailed export and the report pipeline

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregate::{
    activity_ranking, breakdown, daily_stats, hour_profile, weekday_profile, AccountSummary,
    AccountTotals, ActivityBreakdown, DailyStat, HourStat, RankedActivity, TeamComparison,
    WeekdayStat,
};
use crate::invariants::{assert_breakdown_invariants, assert_summary_invariants};
use crate::models::{ActivityKind, ActivityRecord, WorkSession};

/// Optional sections to compute on top of the account summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSelection {
    /// Raw activity records
    pub activities: bool,
    pub daily_stats: bool,
    /// Weekday and time-of-day profiles
    pub breakdown: bool,
    pub project_details: bool,
    pub task_details: bool,
    pub team: bool,
}

impl SectionSelection {
    pub fn all() -> Self {
        Self {
            activities: true,
            daily_stats: true,
            breakdown: true,
            project_details: true,
            task_details: true,
            team: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Rows of one account over a window, as fetched from storage
#[derive(Debug, Clone, Default)]
pub struct AccountDataset {
    pub account_id: Uuid,
    pub sessions: Vec<WorkSession>,
    pub activities: Vec<ActivityRecord>,
    /// Windowed totals of every active employee, when a team comparison is wanted
    pub team: Option<Vec<AccountTotals>>,
}

/// Optional detail sections. A `None` section was not requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<Vec<DailyStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<WeekdayStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<Vec<HourStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ActivityBreakdown>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<ActivityBreakdown>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamComparison>,
}

impl DetailBundle {
    pub fn compute(dataset: &AccountDataset, summary: &AccountSummary, sections: SectionSelection) -> Self {
        let team = if sections.team {
            dataset.team.as_deref().map(|team| {
                let own = AccountTotals {
                    account_id: dataset.account_id,
                    work_seconds: summary.totals.total_work_seconds,
                    days: summary.totals.total_days,
                    entries: summary.counts.total_entries,
                };
                TeamComparison::compute(&own, team)
            })
        } else {
            None
        };

        Self {
            daily: sections.daily_stats.then(|| daily_stats(&dataset.sessions)),
            weekdays: sections.breakdown.then(|| weekday_profile(&dataset.sessions)),
            hours: sections.breakdown.then(|| hour_profile(&dataset.activities)),
            projects: sections
                .project_details
                .then(|| breakdown(&dataset.activities, ActivityKind::Project)),
            tasks: sections
                .task_details
                .then(|| breakdown(&dataset.activities, ActivityKind::Task)),
            team,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_none()
            && self.weekdays.is_none()
            && self.hours.is_none()
            && self.projects.is_none()
            && self.tasks.is_none()
            && self.team.is_none()
    }
}

/// Everything computed for one account over one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateBundle {
    pub summary: AccountSummary,
    pub ranking: Vec<RankedActivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<ActivityRecord>>,
    #[serde(flatten)]
    pub details: DetailBundle,
}

impl AggregateBundle {
    pub fn compute(dataset: &AccountDataset, sections: SectionSelection) -> Self {
        let summary = AccountSummary::compute(&dataset.sessions, &dataset.activities);
        assert_summary_invariants(&summary);

        let details = DetailBundle::compute(dataset, &summary, sections);
        assert_breakdown_invariants(
            details.projects.as_deref().unwrap_or_default(),
            details.tasks.as_deref().unwrap_or_default(),
        );
        Self {
            ranking: activity_ranking(&dataset.activities),
            activities: sections.activities.then(|| dataset.activities.clone()),
            summary,
            details,
        }
    }

    /// Detail sections, or `None` when none were requested
    pub fn details(&self) -> Option<&DetailBundle> {
        (!self.details.is_empty()).then_some(&self.details)
    }
}
