//! Handlers for the `/api/patients` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clinique_core::clinical::{
    validate_age, validate_groupe_sanguin, validate_image_url, validate_required, validate_sexe,
};
use clinique_core::error::CoreError;
use clinique_core::types::DbId;
use clinique_db::models::patient::{CreatePatient, Patient};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{RequireAuth, RequireClinician};
use crate::state::AppState;

fn validate_patient(input: &CreatePatient) -> Result<(), CoreError> {
    validate_required("nom", &input.nom)?;
    validate_age(input.age)?;
    validate_sexe(input.sexe.as_deref())?;
    validate_groupe_sanguin(input.groupe_sanguin.as_deref())?;
    validate_image_url(input.image_url.as_deref())?;
    Ok(())
}

/// POST /api/patients
///
/// The patient is attributed to the calling user.
pub async fn create(
    State(state): State<AppState>,
    RequireClinician(user): RequireClinician,
    AppJson(mut input): AppJson<CreatePatient>,
) -> AppResult<(StatusCode, Json<Patient>)> {
    validate_patient(&input)?;
    input.nom = input.nom.trim().to_string();

    let patient = state
        .clinical
        .create_patient(Some(user.user_id), &input)
        .await?;
    tracing::info!(patient_id = patient.id, created_by = user.user_id, "Patient created");
    Ok((StatusCode::CREATED, Json(patient)))
}

/// GET /api/patients
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<Patient>>> {
    let patients = state.clinical.list_patients().await?;
    Ok(Json(patients))
}

/// GET /api/patients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Patient>> {
    let patient = state
        .clinical
        .find_patient(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id,
        }))?;
    Ok(Json(patient))
}
