//! Handlers for the `/api/vitals` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clinique_core::clinical::{
    validate_non_negative_float, validate_non_negative_int, validate_saturation,
    validate_temperature,
};
use clinique_core::error::CoreError;
use clinique_core::types::DbId;
use clinique_db::models::vital_record::{CreateVitalRecord, VitalRecord};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::{RequireAuth, RequireClinician};
use crate::query::PatientFilter;
use crate::state::AppState;

/// Request body for `POST /api/vitals`.
#[derive(Debug, Deserialize)]
pub struct CreateVitalRecordRequest {
    pub patient_id: Option<DbId>,
    pub temperature: Option<f64>,
    pub tension: Option<String>,
    pub frequence_cardiaque: Option<i32>,
    pub saturation: Option<i32>,
    pub respiration: Option<i32>,
    pub poids: Option<f64>,
    pub taille: Option<f64>,
}

impl CreateVitalRecordRequest {
    fn validate(&self) -> Result<DbId, CoreError> {
        let patient_id = self
            .patient_id
            .ok_or_else(|| CoreError::Validation("patient_id is required".into()))?;
        validate_temperature(self.temperature)?;
        validate_saturation(self.saturation)?;
        validate_non_negative_int("frequence_cardiaque", self.frequence_cardiaque)?;
        validate_non_negative_int("respiration", self.respiration)?;
        validate_non_negative_float("poids", self.poids)?;
        validate_non_negative_float("taille", self.taille)?;
        Ok(patient_id)
    }
}

/// POST /api/vitals
///
/// Returns 404 `UNKNOWN_PATIENT` when `patient_id` does not resolve.
pub async fn create(
    State(state): State<AppState>,
    RequireClinician(user): RequireClinician,
    AppJson(input): AppJson<CreateVitalRecordRequest>,
) -> AppResult<(StatusCode, Json<VitalRecord>)> {
    let patient_id = input.validate()?;

    let record = state
        .clinical
        .create_vital_record(&CreateVitalRecord {
            patient_id,
            temperature: input.temperature,
            tension: input.tension,
            frequence_cardiaque: input.frequence_cardiaque,
            saturation: input.saturation,
            respiration: input.respiration,
            poids: input.poids,
            taille: input.taille,
        })
        .await?;
    tracing::info!(
        vital_record_id = record.id,
        patient_id,
        user_id = user.user_id,
        "Vital signs recorded"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/vitals?patient_id=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppQuery(filter): AppQuery<PatientFilter>,
) -> AppResult<Json<Vec<VitalRecord>>> {
    let records = state.clinical.list_vital_records(filter.patient_id).await?;
    Ok(Json(records))
}

/// GET /api/vitals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<VitalRecord>> {
    let record = state
        .clinical
        .find_vital_record(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VitalRecord",
            id,
        }))?;
    Ok(Json(record))
}
