//! Vital-sign record entity model and DTOs.

use clinique_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `vital_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VitalRecord {
    pub id: DbId,
    pub patient_id: DbId,
    /// Body temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Blood pressure as entered, e.g. `"120/80"`.
    pub tension: Option<String>,
    /// Heart rate in beats per minute.
    pub frequence_cardiaque: Option<i32>,
    /// Oxygen saturation percentage.
    pub saturation: Option<i32>,
    /// Breaths per minute.
    pub respiration: Option<i32>,
    /// Weight in kilograms.
    pub poids: Option<f64>,
    /// Height in centimetres.
    pub taille: Option<f64>,
    pub created_at: Timestamp,
}

/// DTO for recording vital signs for an existing patient.
#[derive(Debug, Clone, Default)]
pub struct CreateVitalRecord {
    pub patient_id: DbId,
    pub temperature: Option<f64>,
    pub tension: Option<String>,
    pub frequence_cardiaque: Option<i32>,
    pub saturation: Option<i32>,
    pub respiration: Option<i32>,
    pub poids: Option<f64>,
    pub taille: Option<f64>,
}
