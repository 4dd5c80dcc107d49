//! Employee management, statistics and the recent activity feed

use axum::extract::{Path, State};
use axum::Json;
use daytimer_core::credentials::{hash_password, validate_password};
use daytimer_core::stats::{EmployeeOverview, GlobalStats};
use daytimer_core::storage::RECENT_ACTIVITY_LIMIT;
use daytimer_core::{Account, AccountRepository, AccountRole, AccountUpdate, Error, RecentActivity};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{non_empty, parse_employee_id};
use crate::error::ApiError;
use crate::extract::{AdminUser, Payload};
use crate::state::{run_blocking, AppState};

#[derive(Debug, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmployeeChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub password: Option<String>,
}

pub async fn create_employee(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Payload(request): Payload<NewEmployee>,
) -> Result<Json<Value>, ApiError> {
    let first_name = non_empty(&request.first_name, "Le prénom est requis")?;
    let last_name = non_empty(&request.last_name, "Le nom est requis")?;
    let email = non_empty(&request.email, "L'email est requis")?;
    validate_password(&request.password)?;
    let password = request.password;
    let password_hash = run_blocking(move || hash_password(&password)).await?;

    let user_id = state
        .with_db(move |db| {
            let account = Account::new(
                first_name,
                last_name,
                email,
                password_hash,
                request.position,
                AccountRole::Employee,
            );
            db.create_account(&account)?;
            Ok(account.id)
        })
        .await?;

    info!(%user_id, admin_id = %admin.id, "Employee created");
    Ok(Json(json!({ "success": true, "user_id": user_id })))
}

pub async fn list_employees(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<Account>>, ApiError> {
    let employees = state
        .with_db(|db| db.accounts().list_active_employees())
        .await?;
    Ok(Json(employees))
}

pub async fn update_employee(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Payload(changes): Payload<EmployeeChanges>,
) -> Result<Json<Value>, ApiError> {
    let employee_id = parse_employee_id(&id)?;

    let mut update = AccountUpdate {
        first_name: changes
            .first_name
            .map(|v| non_empty(&v, "Le prénom est requis"))
            .transpose()?,
        last_name: changes
            .last_name
            .map(|v| non_empty(&v, "Le nom est requis"))
            .transpose()?,
        email: changes
            .email
            .map(|v| non_empty(&v, "L'email est requis"))
            .transpose()?,
        position: changes.position,
        password_hash: None,
    };
    if let Some(password) = changes.password {
        validate_password(&password)?;
        update.password_hash = Some(run_blocking(move || hash_password(&password)).await?);
    }

    let password_changed = update.password_hash.is_some();
    state
        .with_db(move |db| {
            if update.is_empty() {
                return match db.accounts().find_employee(employee_id)? {
                    Some(account) if account.is_active => Ok(()),
                    _ => Err(Error::NotFound(format!("employee {employee_id}"))),
                };
            }
            db.accounts().update_employee(employee_id, &update)?;
            if update.password_hash.is_some() {
                db.delete_account_sessions(employee_id)?;
            }
            Ok(())
        })
        .await?;

    info!(%employee_id, admin_id = %admin.id, password_changed, "Employee updated");
    Ok(Json(json!({ "success": true })))
}

/// Soft delete an employee and revoke their sessions
pub async fn delete_employee(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let employee_id = parse_employee_id(&id)?;
    let removed = state
        .with_db(move |db| {
            let removed = db.accounts().deactivate_employee(employee_id)?;
            if removed {
                db.delete_account_sessions(employee_id)?;
            }
            Ok(removed)
        })
        .await?;

    info!(%employee_id, admin_id = %admin.id, removed, "Employee deactivated");
    Ok(Json(json!({ "success": true })))
}

pub async fn global_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<GlobalStats>, ApiError> {
    let stats = state.with_db(|db| db.stats().global()).await?;
    Ok(Json(stats))
}

pub async fn employee_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<EmployeeOverview>>, ApiError> {
    let stats = state
        .with_db(|db| db.stats().employee_overviews())
        .await?;
    Ok(Json(stats))
}

pub async fn employee_stat(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<EmployeeOverview>, ApiError> {
    let employee_id = parse_employee_id(&id)?;
    state
        .with_db(move |db| db.stats().employee_overview(employee_id))
        .await?
        .map(Json)
        .ok_or(ApiError::EmployeeNotFound)
}

pub async fn recent_activity(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<RecentActivity>>, ApiError> {
    let activities = state
        .with_db(|db| db.time_entries().recent(RECENT_ACTIVITY_LIMIT))
        .await?;
    Ok(Json(activities))
}
