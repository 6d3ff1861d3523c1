//! Handlers for the `/api/diagnostics` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clinique_core::error::CoreError;
use clinique_core::types::DbId;
use clinique_db::models::diagnostic::{CreateDiagnostic, Diagnostic};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::{RequireAuth, RequireClinician};
use crate::query::PatientFilter;
use crate::state::AppState;

/// Request body for `POST /api/diagnostics`.
#[derive(Debug, Deserialize)]
pub struct CreateDiagnosticRequest {
    pub patient_id: Option<DbId>,
    pub symptomes: Option<String>,
    pub maladie: Option<String>,
    pub traitements: Option<String>,
}

/// POST /api/diagnostics
///
/// Returns 404 `UNKNOWN_PATIENT` when `patient_id` does not resolve.
pub async fn create(
    State(state): State<AppState>,
    RequireClinician(user): RequireClinician,
    AppJson(input): AppJson<CreateDiagnosticRequest>,
) -> AppResult<(StatusCode, Json<Diagnostic>)> {
    let patient_id = input
        .patient_id
        .ok_or_else(|| CoreError::Validation("patient_id is required".into()))?;

    let diagnostic = state
        .clinical
        .create_diagnostic(&CreateDiagnostic {
            patient_id,
            symptomes: input.symptomes,
            maladie: input.maladie,
            traitements: input.traitements,
        })
        .await?;
    tracing::info!(
        diagnostic_id = diagnostic.id,
        patient_id,
        user_id = user.user_id,
        "Diagnostic recorded"
    );
    Ok((StatusCode::CREATED, Json(diagnostic)))
}

/// GET /api/diagnostics?patient_id=
///
/// Oldest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppQuery(filter): AppQuery<PatientFilter>,
) -> AppResult<Json<Vec<Diagnostic>>> {
    let diagnostics = state.clinical.list_diagnostics(filter.patient_id).await?;
    Ok(Json(diagnostics))
}

/// GET /api/diagnostics/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Diagnostic>> {
    let diagnostic = state
        .clinical
        .find_diagnostic(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Diagnostic",
            id,
        }))?;
    Ok(Json(diagnostic))
}
