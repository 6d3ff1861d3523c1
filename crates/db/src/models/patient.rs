//! Patient entity model and DTOs.

use clinique_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `patients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Patient {
    pub id: DbId,
    pub nom: String,
    pub age: Option<i32>,
    pub sexe: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub groupe_sanguin: Option<String>,
    pub image_url: Option<String>,
    /// The staff member who registered the patient, if known.
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a new patient.
///
/// `nom` defaults to empty so a missing name surfaces as a validation error
/// rather than a body-parsing failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePatient {
    #[serde(default)]
    pub nom: String,
    pub age: Option<i32>,
    pub sexe: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub groupe_sanguin: Option<String>,
    pub image_url: Option<String>,
}
