//! Task and project catalog

use axum::extract::{Path, State};
use axum::Json;
use daytimer_core::{Project, Task};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{non_empty, parse_id};
use crate::error::ApiError;
use crate::extract::{AdminUser, AuthUser, Payload};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewTask {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
}

pub async fn list_tasks(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .with_db(|db| db.catalog().list_active_tasks())
        .await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Payload(request): Payload<NewTask>,
) -> Result<Json<Value>, ApiError> {
    let name = non_empty(&request.name, "Le nom est requis")?;
    let task = Task::new(name, request.description);
    let task_id = task.id;
    state.with_db(move |db| db.catalog().create_task(&task)).await?;

    info!(%task_id, admin_id = %admin.id, "Task created");
    Ok(Json(json!({ "success": true, "task_id": task_id })))
}

pub async fn delete_task(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let task_id = parse_id(&id)?;
    let removed = state
        .with_db(move |db| db.catalog().deactivate_task(task_id))
        .await?;

    info!(%task_id, admin_id = %admin.id, removed, "Task deactivated");
    Ok(Json(json!({ "success": true })))
}

pub async fn list_projects(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state
        .with_db(|db| db.catalog().list_active_projects())
        .await?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Payload(request): Payload<NewProject>,
) -> Result<Json<Value>, ApiError> {
    let name = non_empty(&request.name, "Le nom est requis")?;
    let project = Project::new(name, request.description, request.client);
    let project_id = project.id;
    state
        .with_db(move |db| db.catalog().create_project(&project))
        .await?;

    info!(%project_id, admin_id = %admin.id, "Project created");
    Ok(Json(json!({ "success": true, "project_id": project_id })))
}

pub async fn delete_project(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let project_id = parse_id(&id)?;
    let removed = state
        .with_db(move |db| db.catalog().deactivate_project(project_id))
        .await?;

    info!(%project_id, admin_id = %admin.id, removed, "Project deactivated");
    Ok(Json(json!({ "success": true })))
}
