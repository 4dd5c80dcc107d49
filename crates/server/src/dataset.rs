//! Loading the rows behind an aggregate bundle

use daytimer_core::stats::AccountTotals;
use daytimer_core::{AccountDataset, DateRange};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Windowed totals of every active employee, when a team comparison is wanted
pub async fn load_team(
    state: &AppState,
    range: Option<DateRange>,
    with_team: bool,
) -> Result<Option<Vec<AccountTotals>>, ApiError> {
    if !with_team {
        return Ok(None);
    }
    state
        .with_db(move |db| db.stats().team_totals(range.as_ref()))
        .await
        .map(Some)
}

/// Fetch an account's sessions and activities over the window, attaching an
/// already loaded team baseline. Both queries are issued concurrently.
pub async fn load_account(
    state: &AppState,
    account_id: Uuid,
    range: Option<DateRange>,
    team: Option<Vec<AccountTotals>>,
) -> Result<AccountDataset, ApiError> {
    let sessions = state.with_db(move |db| {
        db.work_sessions()
            .list_for_account(account_id, range.as_ref())
    });
    let activities = state.with_db(move |db| db.time_entries().activities(account_id, range.as_ref()));

    let (sessions, activities) = tokio::try_join!(sessions, activities)?;
    Ok(AccountDataset {
        account_id,
        sessions,
        activities,
        team,
    })
}

/// Dataset of a single account, with the team baseline loaded alongside
pub async fn load_dataset(
    state: &AppState,
    account_id: Uuid,
    range: Option<DateRange>,
    with_team: bool,
) -> Result<AccountDataset, ApiError> {
    let (dataset, team) = tokio::try_join!(
        load_account(state, account_id, range, None),
        load_team(state, range, with_team)
    )?;
    Ok(AccountDataset { team, ..dataset })
}

/// Datasets of several accounts sharing one team baseline.
///
/// Accounts load concurrently; the result keeps the order of `account_ids`.
pub async fn load_datasets(
    state: &AppState,
    account_ids: &[Uuid],
    range: Option<DateRange>,
    with_team: bool,
) -> Result<Vec<AccountDataset>, ApiError> {
    let team = load_team(state, range, with_team).await?;

    let handles: Vec<_> = account_ids
        .iter()
        .map(|&account_id| {
            let state = state.clone();
            let team = team.clone();
            tokio::spawn(async move { load_account(&state, account_id, range, team).await })
        })
        .collect();

    let mut datasets = Vec::with_capacity(handles.len());
    for handle in handles {
        let dataset = handle
            .await
            .map_err(|e| ApiError::Internal(format!("dataset task failed: {e}")))??;
        datasets.push(dataset);
    }
    Ok(datasets)
}
