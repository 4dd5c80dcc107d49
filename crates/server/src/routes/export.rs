//! Detailed statistics export

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use daytimer_core::{Account, AggregateBundle, DateRange, SectionSelection};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::dataset::load_datasets;
use crate::error::ApiError;
use crate::extract::{AdminUser, Payload};
use crate::state::AppState;

const EXPORT_FAILED: &str = "Erreur lors de l'export";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportRequest {
    pub employee_ids: Option<Vec<Uuid>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub include_activities: bool,
    pub include_breakdown: bool,
    pub include_daily_stats: bool,
    pub include_project_details: bool,
    pub include_task_details: bool,
    pub include_team: bool,
}

impl ExportRequest {
    fn sections(&self) -> SectionSelection {
        SectionSelection {
            activities: self.include_activities,
            daily_stats: self.include_daily_stats,
            breakdown: self.include_breakdown,
            project_details: self.include_project_details,
            task_details: self.include_task_details,
            team: self.include_team,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFilters {
    pub employee_ids: Option<Vec<Uuid>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeExport {
    pub employee: Account,
    #[serde(flatten)]
    pub bundle: AggregateBundle,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    pub export_date: DateTime<Utc>,
    pub filters: ExportFilters,
    pub data: Vec<EmployeeExport>,
}

/// Build one aggregate bundle per selected employee. The team baseline is
/// loaded once and shared. Any failure fails the whole export.
pub async fn detailed(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Payload(request): Payload<ExportRequest>,
) -> Result<Json<ExportResponse>, ApiError> {
    let range = DateRange::from_bounds(request.start_date.as_deref(), request.end_date.as_deref())?;
    let sections = request.sections();

    let ids = request.employee_ids.clone().unwrap_or_default();
    let employees = state
        .with_db(move |db| {
            let accounts = db.accounts();
            if ids.is_empty() {
                return accounts.list_active_employees();
            }
            let mut employees = Vec::with_capacity(ids.len());
            for id in ids {
                // Unknown ids are skipped
                if let Some(account) = accounts.find_employee(id)? {
                    employees.push(account);
                }
            }
            Ok(employees)
        })
        .await
        .map_err(|e| e.within(EXPORT_FAILED))?;

    let account_ids: Vec<Uuid> = employees.iter().map(|employee| employee.id).collect();
    let datasets = load_datasets(&state, &account_ids, range, sections.team)
        .await
        .map_err(|e| e.within(EXPORT_FAILED))?;
    let data: Vec<EmployeeExport> = employees
        .into_iter()
        .zip(datasets)
        .map(|(employee, dataset)| EmployeeExport {
            bundle: AggregateBundle::compute(&dataset, sections),
            employee,
        })
        .collect();

    info!(
        admin_id = %admin.id,
        employees = data.len(),
        windowed = range.is_some(),
        "Detailed export"
    );
    Ok(Json(ExportResponse {
        success: true,
        export_date: Utc::now(),
        filters: ExportFilters {
            employee_ids: request.employee_ids,
            start_date: request.start_date,
            end_date: request.end_date,
        },
        data,
    }))
}
