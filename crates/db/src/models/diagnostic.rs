//! Diagnostic entity model and DTOs.

use clinique_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `diagnostics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Diagnostic {
    pub id: DbId,
    pub patient_id: DbId,
    pub symptomes: Option<String>,
    pub maladie: Option<String>,
    pub traitements: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a diagnostic under an existing patient.
#[derive(Debug, Clone, Default)]
pub struct CreateDiagnostic {
    pub patient_id: DbId,
    pub symptomes: Option<String>,
    pub maladie: Option<String>,
    pub traitements: Option<String>,
}
