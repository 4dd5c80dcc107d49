//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::models::{DayCounters, TimeEntry};
use crate::stats::{AccountSummary, ActivityBreakdown};

/// Validate that a summary's ratios are in range
pub fn assert_summary_invariants(summary: &AccountSummary) {
    debug_assert!(
        (0.0..=100.0).contains(&summary.productivity_rate),
        "productivity rate {} outside [0, 100]",
        summary.productivity_rate
    );

    debug_assert!(
        (0.0..=1.0).contains(&summary.consistency_score),
        "consistency score {} outside [0, 1]",
        summary.consistency_score
    );

    let totals = &summary.totals;
    debug_assert!(
        totals.total_days == 0
            || (totals.min_day_work_seconds <= totals.max_day_work_seconds),
        "min day work {} exceeds max {}",
        totals.min_day_work_seconds,
        totals.max_day_work_seconds
    );
}

/// Validate that per-project and per-task shares do not exceed the whole
pub fn assert_breakdown_invariants(projects: &[ActivityBreakdown], tasks: &[ActivityBreakdown]) {
    let share: f64 = projects
        .iter()
        .chain(tasks.iter())
        .map(|row| row.share_percent)
        .sum();
    // Float slack
    debug_assert!(share <= 100.0 + 1e-6, "breakdown shares sum to {share}%");

    for row in projects.iter().chain(tasks.iter()) {
        debug_assert!(
            row.first_date <= row.last_date,
            "breakdown {} spans {} to {}",
            row.id,
            row.first_date,
            row.last_date
        );
        debug_assert!(
            row.session_count > 0,
            "breakdown {} has no sessions",
            row.id
        );
    }
}

/// Validate counters received from a client
pub fn assert_counters_invariants(counters: &DayCounters) {
    debug_assert!(
        counters.work_seconds >= 0 && counters.break_seconds >= 0 && counters.lunch_seconds >= 0,
        "negative counters {counters:?}"
    );
}

/// Validate that a completed entry is consistent
pub fn assert_entry_invariants(entry: &TimeEntry) {
    if let Some(ended_at) = entry.ended_at {
        debug_assert!(
            ended_at >= entry.started_at,
            "entry {} ends before it starts",
            entry.id
        );
    }
    debug_assert!(
        entry.duration_seconds >= 0,
        "entry {} has negative duration",
        entry.id
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayCounters;
    use crate::stats::AccountSummary;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_valid_states_pass() {
        assert_summary_invariants(&AccountSummary::default());
        assert_breakdown_invariants(&[], &[]);
        assert_counters_invariants(&DayCounters::new(1, 0, 0));
        assert_entry_invariants(&TimeEntry::start(Uuid::new_v4(), None, None, Utc::now()));
    }

    #[test]
    #[should_panic(expected = "negative counters")]
    #[cfg(debug_assertions)]
    fn test_negative_counters_detected() {
        assert_counters_invariants(&DayCounters::new(-1, 0, 0));
    }
}
