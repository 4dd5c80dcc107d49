//! Today's work/break/lunch counters

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use daytimer_core::invariants::assert_counters_invariants;
use daytimer_core::{DayCounters, TimeTrackingRepository, WorkSession};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::extract::{AuthUser, Payload};
use crate::state::AppState;

/// Today's row, or zeroed counters when tracking has not started
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TodaySession {
    Tracked(WorkSession),
    Untracked(DayCounters),
}

pub async fn today(
    State(state): State<AppState>,
    AuthUser { caller, .. }: AuthUser,
) -> Result<Json<TodaySession>, ApiError> {
    let today = Utc::now().date_naive();
    let session = state
        .with_db(move |db| db.day_session(caller.id, today))
        .await?;

    Ok(Json(match session {
        Some(session) => TodaySession::Tracked(session),
        None => TodaySession::Untracked(DayCounters::default()),
    }))
}

/// Overwrite today's counters with the running totals sent by the client
pub async fn update(
    State(state): State<AppState>,
    AuthUser { caller, .. }: AuthUser,
    Payload(counters): Payload<DayCounters>,
) -> Result<Json<Value>, ApiError> {
    counters.validate()?;
    assert_counters_invariants(&counters);

    let now = Utc::now();
    state
        .with_db(move |db| db.save_day_counters(caller.id, now.date_naive(), counters, now))
        .await?;

    Ok(Json(json!({ "success": true, "message": "Session mise à jour" })))
}

/// Stamp the end of today's session. Succeeds without creating a row when
/// tracking never started today.
pub async fn end_day(
    State(state): State<AppState>,
    AuthUser { caller, .. }: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let now = Utc::now();
    let ended = state
        .with_db(move |db| db.end_day(caller.id, now.date_naive(), now))
        .await?;
    if !ended {
        debug!(account_id = %caller.id, "End of day without a session row");
    }

    Ok(Json(json!({ "success": true, "message": "Journée terminée" })))
}
