//! Task/project time entries

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use daytimer_core::invariants::assert_entry_invariants;
use daytimer_core::storage::HISTORY_LIMIT;
use daytimer_core::{validate_duration, HistoryEntry, TimeEntry, TimeTrackingRepository};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use super::parse_id;
use crate::error::ApiError;
use crate::extract::{AuthUser, Payload};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StartRequest {
    pub task_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub duration_seconds: i64,
}

/// Open a zero-length entry. Catalog ids are not checked.
pub async fn start(
    State(state): State<AppState>,
    AuthUser { caller, .. }: AuthUser,
    Payload(request): Payload<StartRequest>,
) -> Result<Json<Value>, ApiError> {
    let entry = TimeEntry::start(caller.id, request.task_id, request.project_id, Utc::now());
    assert_entry_invariants(&entry);

    let entry_id = entry.id;
    state.with_db(move |db| db.start_entry(&entry)).await?;

    Ok(Json(json!({ "success": true, "entry_id": entry_id })))
}

/// Set the final duration of one of the caller's entries
pub async fn complete(
    State(state): State<AppState>,
    AuthUser { caller, .. }: AuthUser,
    Path(id): Path<String>,
    Payload(request): Payload<CompleteRequest>,
) -> Result<Json<Value>, ApiError> {
    let entry_id = parse_id(&id)?;
    validate_duration(request.duration_seconds)?;

    let updated = state
        .with_db(move |db| {
            db.complete_entry(caller.id, entry_id, request.duration_seconds, Utc::now())
        })
        .await?;
    if !updated {
        debug!(%entry_id, account_id = %caller.id, "No entry matched the update");
    }

    Ok(Json(json!({ "success": true })))
}

pub async fn history(
    State(state): State<AppState>,
    AuthUser { caller, .. }: AuthUser,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let entries = state
        .with_db(move |db| db.entry_history(caller.id, HISTORY_LIMIT))
        .await?;
    Ok(Json(entries))
}
