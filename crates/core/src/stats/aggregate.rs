//! Aggregate computations over work sessions and time entries

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Timelike};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{ActivityKind, ActivityRecord, WorkSession};

/// Label used for entries without a resolvable task or project
pub const UNCATEGORIZED: &str = "Non catégorisé";

/// Share of total time spent working, in percent. Zero when nothing was tracked.
pub fn productivity_rate(work_seconds: i64, break_seconds: i64, lunch_seconds: i64) -> f64 {
    let total = work_seconds as f64 + break_seconds as f64 + lunch_seconds as f64;
    if total <= 0.0 {
        return 0.0;
    }
    (work_seconds as f64 / total * 100.0).clamp(0.0, 100.0)
}

/// `part / whole * 100`, zero when `whole` is zero
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Relative deviation of `value` from `baseline`, in percent. Zero without a baseline.
pub fn deviation_percent(value: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        0.0
    } else {
        (value - baseline) / baseline * 100.0
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Work/break/lunch totals and per-day distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeTotals {
    pub total_work_seconds: i64,
    pub total_break_seconds: i64,
    pub total_lunch_seconds: i64,
    pub total_days: i64,
    pub avg_day_work_seconds: f64,
    pub min_day_work_seconds: i64,
    pub max_day_work_seconds: i64,
}

impl TimeTotals {
    pub fn from_sessions(sessions: &[WorkSession]) -> Self {
        let mut totals = Self::default();
        if sessions.is_empty() {
            return totals;
        }

        let mut min = i64::MAX;
        let mut max = i64::MIN;
        for session in sessions {
            let c = &session.counters;
            totals.total_work_seconds = totals.total_work_seconds.saturating_add(c.work_seconds);
            totals.total_break_seconds = totals.total_break_seconds.saturating_add(c.break_seconds);
            totals.total_lunch_seconds = totals.total_lunch_seconds.saturating_add(c.lunch_seconds);
            min = min.min(c.work_seconds);
            max = max.max(c.work_seconds);
        }

        let days: HashSet<NaiveDate> = sessions.iter().map(|s| s.date).collect();
        totals.total_days = days.len() as i64;
        totals.avg_day_work_seconds = totals.total_work_seconds as f64 / totals.total_days as f64;
        totals.min_day_work_seconds = min;
        totals.max_day_work_seconds = max;
        totals
    }

    pub fn total_seconds(&self) -> i64 {
        self.total_work_seconds
            .saturating_add(self.total_break_seconds)
            .saturating_add(self.total_lunch_seconds)
    }

    pub fn pause_seconds(&self) -> i64 {
        self.total_break_seconds.saturating_add(self.total_lunch_seconds)
    }
}

/// Distinct catalog entries touched and entry count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityCounts {
    pub total_projects: i64,
    pub total_tasks: i64,
    pub total_entries: i64,
}

impl ActivityCounts {
    pub fn from_activities(activities: &[ActivityRecord]) -> Self {
        let projects: HashSet<Uuid> = activities.iter().filter_map(|a| a.project_id).collect();
        let tasks: HashSet<Uuid> = activities.iter().filter_map(|a| a.task_id).collect();
        Self {
            total_projects: projects.len() as i64,
            total_tasks: tasks.len() as i64,
            total_entries: activities.len() as i64,
        }
    }
}

/// Core summary of one account over a window
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountSummary {
    #[serde(flatten)]
    pub totals: TimeTotals,
    #[serde(flatten)]
    pub counts: ActivityCounts,
    /// work / (work + break + lunch) × 100, in [0, 100]
    pub productivity_rate: f64,
    /// 1 − (max − min) / avg of daily work, clamped to [0, 1]
    pub consistency_score: f64,
    /// work / max(break + lunch, 1 second)
    pub work_break_ratio: f64,
}

impl AccountSummary {
    pub fn compute(sessions: &[WorkSession], activities: &[ActivityRecord]) -> Self {
        let totals = TimeTotals::from_sessions(sessions);
        let counts = ActivityCounts::from_activities(activities);

        let productivity_rate = productivity_rate(
            totals.total_work_seconds,
            totals.total_break_seconds,
            totals.total_lunch_seconds,
        );

        let consistency_score = if totals.avg_day_work_seconds > 0.0 {
            let spread = totals.max_day_work_seconds.saturating_sub(totals.min_day_work_seconds) as f64;
            (1.0 - spread / totals.avg_day_work_seconds).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let work_break_ratio =
            totals.total_work_seconds as f64 / totals.pause_seconds().max(1) as f64;

        Self {
            totals,
            counts,
            productivity_rate,
            consistency_score,
            work_break_ratio,
        }
    }
}

/// One day of tracked time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub work_seconds: i64,
    pub break_seconds: i64,
    pub lunch_seconds: i64,
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    /// Rounded to two decimals
    pub productivity_rate: f64,
}

/// Per-day rows, newest first
pub fn daily_stats(sessions: &[WorkSession]) -> Vec<DailyStat> {
    let mut days: Vec<DailyStat> = sessions
        .iter()
        .map(|s| DailyStat {
            date: s.date,
            work_seconds: s.counters.work_seconds,
            break_seconds: s.counters.break_seconds,
            lunch_seconds: s.counters.lunch_seconds,
            start_time: s.start_time,
            end_time: s.end_time,
            productivity_rate: round2(productivity_rate(
                s.counters.work_seconds,
                s.counters.break_seconds,
                s.counters.lunch_seconds,
            )),
        })
        .collect();
    days.sort_by(|a, b| b.date.cmp(&a.date));
    days
}

/// Averages for one day of the week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStat {
    /// 0 = Sunday … 6 = Saturday
    pub weekday: u8,
    pub day_count: i64,
    pub avg_work_seconds: f64,
    /// Work share of the weekday's tracked time, in percent
    pub productivity_score: f64,
}

/// Weekday averages for weekdays with data, Monday first
pub fn weekday_profile(sessions: &[WorkSession]) -> Vec<WeekdayStat> {
    // weekday -> (days, work, break, lunch)
    let mut groups: BTreeMap<u8, (i64, i64, i64, i64)> = BTreeMap::new();
    for session in sessions {
        let weekday = session.date.weekday().num_days_from_sunday() as u8;
        let group = groups.entry(weekday).or_default();
        group.0 += 1;
        group.1 = group.1.saturating_add(session.counters.work_seconds);
        group.2 = group.2.saturating_add(session.counters.break_seconds);
        group.3 = group.3.saturating_add(session.counters.lunch_seconds);
    }

    let mut stats: Vec<WeekdayStat> = groups
        .into_iter()
        .map(|(weekday, (days, work, brk, lunch))| WeekdayStat {
            weekday,
            day_count: days,
            avg_work_seconds: work as f64 / days as f64,
            productivity_score: productivity_rate(work, brk, lunch),
        })
        .collect();
    stats.sort_by_key(|s| (s.weekday + 6) % 7);
    stats
}

/// Entries grouped by the hour they started
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourStat {
    pub hour: u8,
    pub entry_count: i64,
    pub total_seconds: i64,
}

/// Time-of-day profile, ordered by hour
pub fn hour_profile(activities: &[ActivityRecord]) -> Vec<HourStat> {
    let mut groups: BTreeMap<u8, (i64, i64)> = BTreeMap::new();
    for activity in activities {
        let group = groups
            .entry(activity.started_at.hour() as u8)
            .or_default();
        group.0 += 1;
        group.1 = group.1.saturating_add(activity.duration_seconds);
    }
    groups
        .into_iter()
        .map(|(hour, (count, seconds))| HourStat {
            hour,
            entry_count: count,
            total_seconds: seconds,
        })
        .collect()
}

/// Activities grouped by name for the ranking table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedActivity {
    pub name: String,
    pub kind: Option<ActivityKind>,
    pub total_seconds: i64,
    pub occurrences: i64,
    pub description: Option<String>,
    pub client: Option<String>,
}

impl RankedActivity {
    pub fn avg_seconds(&self) -> f64 {
        if self.occurrences == 0 {
            0.0
        } else {
            self.total_seconds as f64 / self.occurrences as f64
        }
    }
}

/// Activities grouped by name, longest total first (ties by name)
pub fn activity_ranking(activities: &[ActivityRecord]) -> Vec<RankedActivity> {
    let mut groups: HashMap<String, RankedActivity> = HashMap::new();
    for activity in activities {
        let name = activity
            .activity_name
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        let entry = groups.entry(name.clone()).or_insert_with(|| RankedActivity {
            name,
            kind: activity.activity_type,
            total_seconds: 0,
            occurrences: 0,
            description: activity
                .task_description
                .clone()
                .or_else(|| activity.project_description.clone()),
            client: activity.project_client.clone(),
        });
        entry.total_seconds = entry.total_seconds.saturating_add(activity.duration_seconds);
        entry.occurrences += 1;
    }

    let mut ranking: Vec<RankedActivity> = groups.into_values().collect();
    ranking.sort_by(|a, b| {
        b.total_seconds
            .cmp(&a.total_seconds)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranking
}

/// Share of total time held by the `n` longest activities, in percent
pub fn top_share(ranking: &[RankedActivity], n: usize) -> f64 {
    let total: i64 = ranking.iter().map(|a| a.total_seconds).sum();
    let top: i64 = ranking.iter().take(n).map(|a| a.total_seconds).sum();
    percent_of(top as f64, total as f64)
}

/// Time spent on one project or task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityBreakdown {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub session_count: i64,
    pub total_seconds: i64,
    pub avg_session_seconds: f64,
    pub min_session_seconds: i64,
    pub max_session_seconds: i64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Share of all time-entry time in the window, in percent
    pub share_percent: f64,
    /// Days from first to last activity, both included
    pub active_day_span: i64,
}

/// Per-project or per-task breakdown, longest total first.
///
/// Each entry counts once, under the kind it is classified as; entries whose
/// catalog row is missing are left out. Shares across both kinds therefore
/// sum to at most 100%.
pub fn breakdown(activities: &[ActivityRecord], kind: ActivityKind) -> Vec<ActivityBreakdown> {
    let grand_total: i64 = activities.iter().map(|a| a.duration_seconds).sum();
    let mut groups: HashMap<Uuid, ActivityBreakdown> = HashMap::new();

    for activity in activities.iter().filter(|a| a.activity_type == Some(kind)) {
        let (id, name, description, client) = match kind {
            ActivityKind::Task => (
                activity.task_id,
                activity.task_name.clone(),
                activity.task_description.clone(),
                None,
            ),
            ActivityKind::Project => (
                activity.project_id,
                activity.project_name.clone(),
                activity.project_description.clone(),
                activity.project_client.clone(),
            ),
        };
        let (Some(id), Some(name)) = (id, name) else {
            continue;
        };

        let seconds = activity.duration_seconds;
        let group = groups.entry(id).or_insert_with(|| ActivityBreakdown {
            id,
            name,
            description,
            client,
            session_count: 0,
            total_seconds: 0,
            avg_session_seconds: 0.0,
            min_session_seconds: seconds,
            max_session_seconds: seconds,
            first_date: activity.date,
            last_date: activity.date,
            share_percent: 0.0,
            active_day_span: 0,
        });
        group.session_count += 1;
        group.total_seconds = group.total_seconds.saturating_add(seconds);
        group.min_session_seconds = group.min_session_seconds.min(seconds);
        group.max_session_seconds = group.max_session_seconds.max(seconds);
        group.first_date = group.first_date.min(activity.date);
        group.last_date = group.last_date.max(activity.date);
    }

    let mut rows: Vec<ActivityBreakdown> = groups
        .into_values()
        .map(|mut row| {
            row.avg_session_seconds = row.total_seconds as f64 / row.session_count as f64;
            row.share_percent = percent_of(row.total_seconds as f64, grand_total as f64);
            row.active_day_span = (row.last_date - row.first_date).num_days() + 1;
            row
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_seconds
            .cmp(&a.total_seconds)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

/// Windowed totals of one account, as used for team baselines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountTotals {
    pub account_id: Uuid,
    pub work_seconds: i64,
    pub days: i64,
    pub entries: i64,
}

impl AccountTotals {
    /// Average number of time entries per tracked day
    pub fn daily_activity_count(&self) -> f64 {
        self.entries as f64 / self.days.max(1) as f64
    }
}

/// One account measured against the team average
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamComparison {
    pub team_size: i64,
    pub team_avg_work_seconds: f64,
    pub team_avg_daily_activities: f64,
    pub account_work_seconds: i64,
    pub account_daily_activities: f64,
    pub work_deviation_percent: f64,
    pub activity_deviation_percent: f64,
}

impl TeamComparison {
    pub fn compute(account: &AccountTotals, team: &[AccountTotals]) -> Self {
        let size = team.len() as f64;
        let (team_avg_work_seconds, team_avg_daily_activities) = if team.is_empty() {
            (0.0, 0.0)
        } else {
            (
                team.iter().map(|t| t.work_seconds as f64).sum::<f64>() / size,
                team.iter().map(|t| t.daily_activity_count()).sum::<f64>() / size,
            )
        };
        let account_daily_activities = account.daily_activity_count();

        Self {
            team_size: team.len() as i64,
            team_avg_work_seconds,
            team_avg_daily_activities,
            account_work_seconds: account.work_seconds,
            account_daily_activities,
            work_deviation_percent: deviation_percent(
                account.work_seconds as f64,
                team_avg_work_seconds,
            ),
            activity_deviation_percent: deviation_percent(
                account_daily_activities,
                team_avg_daily_activities,
            ),
        }
    }
}

/// Organization-wide counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalStats {
    pub total_employees: i64,
    pub total_tasks: i64,
    pub total_projects: i64,
    pub total_work_seconds: i64,
}

/// All-time statistics row for one active employee
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeOverview {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: Option<String>,
    pub total_days: i64,
    pub total_work_seconds: i64,
    pub total_break_seconds: i64,
    pub total_lunch_seconds: i64,
    pub total_entries: i64,
    pub productivity_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayCounters;
    use chrono::{TimeZone, Utc};

    fn session(date: &str, work: i64, brk: i64, lunch: i64) -> WorkSession {
        WorkSession {
            id: Uuid::new_v4(),
            account_id: Uuid::nil(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            counters: DayCounters::new(work, brk, lunch),
            start_time: None,
            end_time: None,
        }
    }

    fn activity(
        kind: Option<ActivityKind>,
        id: Uuid,
        name: Option<&str>,
        date: &str,
        hour: u32,
        seconds: i64,
    ) -> ActivityRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let started_at = Utc
            .from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap());
        let (task_id, project_id) = match kind {
            Some(ActivityKind::Task) => (Some(id), None),
            Some(ActivityKind::Project) => (None, Some(id)),
            None => (None, None),
        };
        let (task_name, project_name) = match kind {
            Some(ActivityKind::Task) => (name.map(String::from), None),
            Some(ActivityKind::Project) => (None, name.map(String::from)),
            None => (None, None),
        };
        ActivityRecord {
            id: Uuid::new_v4(),
            date,
            started_at,
            ended_at: None,
            duration_seconds: seconds,
            task_id,
            project_id,
            activity_name: task_name.clone().or_else(|| project_name.clone()),
            task_name,
            project_name,
            activity_type: kind,
            task_description: None,
            project_description: None,
            project_client: None,
        }
    }

    #[test]
    fn test_two_day_totals() {
        let sessions = vec![
            session("2026-03-02", 3600, 600, 1800),
            session("2026-03-03", 7200, 0, 1800),
        ];
        let summary = AccountSummary::compute(&sessions, &[]);

        assert_eq!(summary.totals.total_work_seconds, 10800);
        assert_eq!(summary.totals.total_break_seconds, 600);
        assert_eq!(summary.totals.total_lunch_seconds, 3600);
        assert_eq!(summary.totals.total_days, 2);
        assert_eq!(summary.totals.min_day_work_seconds, 3600);
        assert_eq!(summary.totals.max_day_work_seconds, 7200);
        assert!((summary.totals.avg_day_work_seconds - 5400.0).abs() < 1e-9);
        assert!((summary.productivity_rate - 72.0).abs() < 1e-9);
        // 1 - 3600 / 5400
        assert!((summary.consistency_score - (1.0 / 3.0)).abs() < 1e-9);
        assert!((summary.work_break_ratio - 10800.0 / 4200.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_window_is_all_zero() {
        let summary = AccountSummary::compute(&[], &[]);
        assert_eq!(summary, AccountSummary::default());
        assert_eq!(summary.productivity_rate, 0.0);
        assert_eq!(summary.work_break_ratio, 0.0);
    }

    #[test]
    fn test_productivity_rate_bounds() {
        assert_eq!(productivity_rate(0, 0, 0), 0.0);
        assert_eq!(productivity_rate(100, 0, 0), 100.0);
        assert_eq!(productivity_rate(0, 50, 50), 0.0);
        for (w, b, l) in [(1, 2, 3), (3600, 0, 1), (0, 0, 7), (86400, 86400, 86400)] {
            let rate = productivity_rate(w, b, l);
            assert!((0.0..=100.0).contains(&rate));
        }
        let rate = productivity_rate(i64::MAX, i64::MAX, 3);
        assert!((0.0..=100.0).contains(&rate));
    }

    #[test]
    fn test_summary_saturates_on_huge_counters() {
        let sessions = vec![
            session("2026-03-02", i64::MAX, i64::MAX, 3),
            session("2026-03-03", i64::MAX, 0, 0),
        ];
        let summary = AccountSummary::compute(&sessions, &[]);
        assert_eq!(summary.totals.total_work_seconds, i64::MAX);
        assert_eq!(summary.totals.total_seconds(), i64::MAX);
        assert!((0.0..=100.0).contains(&summary.productivity_rate));
    }

    #[test]
    fn test_consistency_clamped() {
        // Spread larger than the average
        let sessions = vec![session("2026-03-02", 100, 0, 0), session("2026-03-03", 10000, 0, 0)];
        let summary = AccountSummary::compute(&sessions, &[]);
        assert_eq!(summary.consistency_score, 0.0);

        let steady = vec![session("2026-03-02", 3600, 0, 0), session("2026-03-03", 3600, 0, 0)];
        assert_eq!(AccountSummary::compute(&steady, &[]).consistency_score, 1.0);
    }

    #[test]
    fn test_daily_stats_newest_first() {
        let sessions = vec![
            session("2026-03-02", 3600, 600, 1800),
            session("2026-03-04", 0, 0, 0),
            session("2026-03-03", 7200, 0, 1800),
        ];
        let days = daily_stats(&sessions);
        assert_eq!(days[0].date.to_string(), "2026-03-04");
        assert_eq!(days[0].productivity_rate, 0.0);
        assert_eq!(days[1].productivity_rate, 80.0);
        assert_eq!(days[2].productivity_rate, 60.0);
    }

    #[test]
    fn test_weekday_profile() {
        // 2026-03-02 is a Monday, 2026-03-08 a Sunday
        let sessions = vec![
            session("2026-03-02", 3600, 0, 0),
            session("2026-03-09", 7200, 0, 0),
            session("2026-03-08", 1800, 1800, 0),
        ];
        let profile = weekday_profile(&sessions);
        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0].weekday, 1);
        assert_eq!(profile[0].day_count, 2);
        assert_eq!(profile[0].avg_work_seconds, 5400.0);
        assert_eq!(profile[0].productivity_score, 100.0);
        assert_eq!(profile[1].weekday, 0);
        assert_eq!(profile[1].productivity_score, 50.0);
    }

    #[test]
    fn test_hour_profile() {
        let id = Uuid::new_v4();
        let activities = vec![
            activity(Some(ActivityKind::Task), id, Some("A"), "2026-03-02", 14, 600),
            activity(Some(ActivityKind::Task), id, Some("A"), "2026-03-02", 9, 300),
            activity(Some(ActivityKind::Task), id, Some("A"), "2026-03-03", 9, 300),
        ];
        let profile = hour_profile(&activities);
        assert_eq!(
            profile,
            vec![
                HourStat { hour: 9, entry_count: 2, total_seconds: 600 },
                HourStat { hour: 14, entry_count: 1, total_seconds: 600 },
            ]
        );
    }

    #[test]
    fn test_ranking_and_concentration() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let activities = vec![
            activity(Some(ActivityKind::Task), a, Some("Support"), "2026-03-02", 9, 600),
            activity(Some(ActivityKind::Project), b, Some("Site"), "2026-03-02", 10, 1800),
            activity(Some(ActivityKind::Task), a, Some("Support"), "2026-03-03", 9, 600),
            activity(None, Uuid::nil(), None, "2026-03-03", 11, 100),
        ];
        let ranking = activity_ranking(&activities);
        assert_eq!(ranking[0].name, "Site");
        assert_eq!(ranking[1].name, "Support");
        assert_eq!(ranking[1].occurrences, 2);
        assert_eq!(ranking[1].avg_seconds(), 600.0);
        assert_eq!(ranking[2].name, UNCATEGORIZED);

        assert_eq!(top_share(&ranking, 5), 100.0);
        assert!((top_share(&ranking, 1) - 1800.0 / 3100.0 * 100.0).abs() < 1e-9);
        assert_eq!(top_share(&[], 5), 0.0);
    }

    #[test]
    fn test_breakdown_shares_stay_under_hundred() {
        let site = Uuid::new_v4();
        let support = Uuid::new_v4();
        let activities = vec![
            activity(Some(ActivityKind::Project), site, Some("Site"), "2026-03-02", 9, 1200),
            activity(Some(ActivityKind::Project), site, Some("Site"), "2026-03-06", 9, 600),
            activity(Some(ActivityKind::Task), support, Some("Support"), "2026-03-03", 9, 600),
            activity(None, Uuid::nil(), None, "2026-03-03", 9, 600),
        ];
        let projects = breakdown(&activities, ActivityKind::Project);
        let tasks = breakdown(&activities, ActivityKind::Task);

        assert_eq!(projects.len(), 1);
        let site_row = &projects[0];
        assert_eq!(site_row.session_count, 2);
        assert_eq!(site_row.total_seconds, 1800);
        assert_eq!(site_row.min_session_seconds, 600);
        assert_eq!(site_row.max_session_seconds, 1200);
        assert_eq!(site_row.avg_session_seconds, 900.0);
        assert_eq!(site_row.active_day_span, 5);
        assert_eq!(site_row.share_percent, 60.0);

        let total: f64 = projects
            .iter()
            .chain(tasks.iter())
            .map(|r| r.share_percent)
            .sum();
        assert!((total - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_full_attribution_sums_to_hundred() {
        let site = Uuid::new_v4();
        let support = Uuid::new_v4();
        let activities = vec![
            activity(Some(ActivityKind::Project), site, Some("Site"), "2026-03-02", 9, 700),
            activity(Some(ActivityKind::Task), support, Some("Support"), "2026-03-03", 9, 300),
        ];
        let total: f64 = breakdown(&activities, ActivityKind::Project)
            .iter()
            .chain(breakdown(&activities, ActivityKind::Task).iter())
            .map(|r| r.share_percent)
            .sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_skips_dangling_references() {
        let activities = vec![activity(
            Some(ActivityKind::Task),
            Uuid::new_v4(),
            None,
            "2026-03-02",
            9,
            600,
        )];
        assert!(breakdown(&activities, ActivityKind::Task).is_empty());
    }

    #[test]
    fn test_team_comparison() {
        let me = AccountTotals {
            account_id: Uuid::new_v4(),
            work_seconds: 12000,
            days: 2,
            entries: 8,
        };
        let other = AccountTotals {
            account_id: Uuid::new_v4(),
            work_seconds: 4000,
            days: 0,
            entries: 0,
        };
        let team = vec![me.clone(), other];
        let cmp = TeamComparison::compute(&me, &team);

        assert_eq!(cmp.team_size, 2);
        assert_eq!(cmp.team_avg_work_seconds, 8000.0);
        assert_eq!(cmp.team_avg_daily_activities, 2.0);
        assert_eq!(cmp.account_daily_activities, 4.0);
        assert_eq!(cmp.work_deviation_percent, 50.0);
        assert_eq!(cmp.activity_deviation_percent, 100.0);

        let alone = TeamComparison::compute(&AccountTotals::default(), &[]);
        assert_eq!(alone.work_deviation_percent, 0.0);
        assert_eq!(alone.activity_deviation_percent, 0.0);
    }
}
