//! Report generation through the external document service

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use daytimer_core::{render_report, AggregateBundle, DateRange, SectionSelection};
use daytimer_net::GenerationRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::parse_employee_id;
use crate::dataset::load_dataset;
use crate::error::ApiError;
use crate::extract::{AdminUser, Payload};
use crate::state::AppState;

const GENERATION_UPSTREAM: &str = "Erreur API Gamma";
const GENERATION_FAILED: &str = "Erreur lors de la génération du rapport";
const STATUS_FAILED: &str = "Erreur lors de la vérification du statut";

const GENERATION_PENDING: &str = "Génération en cours... Cela peut prendre 30-60 secondes.";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub include_details: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmitted {
    pub success: bool,
    pub generation_id: String,
    pub message: &'static str,
}

/// Aggregate an employee's activity, render the report and submit it.
///
/// The response is held open for the whole upstream round-trip.
pub async fn generate(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(employee_id): Path<String>,
    Payload(request): Payload<ReportRequest>,
) -> Result<Json<ReportSubmitted>, ApiError> {
    let employee_id = parse_employee_id(&employee_id)?;
    let range = DateRange::from_bounds(request.start_date.as_deref(), request.end_date.as_deref())?;

    let employee = state
        .with_db(move |db| db.accounts().find_employee(employee_id))
        .await
        .map_err(|e| e.within(GENERATION_FAILED))?
        .ok_or(ApiError::EmployeeNotFound)?;

    let sections = if request.include_details {
        SectionSelection::all()
    } else {
        SectionSelection::none()
    };
    let dataset = load_dataset(&state, employee.id, range, sections.team)
        .await
        .map_err(|e| e.within(GENERATION_FAILED))?;
    let bundle = AggregateBundle::compute(&dataset, sections);
    let document = render_report(
        &employee,
        &bundle.summary,
        &dataset.activities,
        bundle.details(),
        Utc::now(),
    );

    info!(
        %employee_id,
        admin_id = %admin.id,
        start = ?range.map(|r| r.start),
        end = ?range.map(|r| r.end),
        include_details = request.include_details,
        document_len = document.len(),
        "Submitting report generation"
    );

    let generation = GenerationRequest::new(document, &state.render_options());
    let generation_id = state
        .gamma()
        .submit(&generation)
        .await
        .map_err(|e| ApiError::from_generation(e, GENERATION_UPSTREAM, GENERATION_FAILED))?;

    info!(%employee_id, %generation_id, "Report generation started");
    Ok(Json(ReportSubmitted {
        success: true,
        generation_id,
        message: GENERATION_PENDING,
    }))
}

/// Forward the generation service's status payload verbatim
pub async fn status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(generation_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let payload = state
        .gamma()
        .poll_status(&generation_id)
        .await
        .map_err(|e| ApiError::from_generation(e, STATUS_FAILED, STATUS_FAILED))?;
    Ok(Json(payload))
}
