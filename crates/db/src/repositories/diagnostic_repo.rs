//! Repository for the `diagnostics` table.

use clinique_core::types::DbId;
use sqlx::PgPool;

use crate::models::diagnostic::{CreateDiagnostic, Diagnostic};

const COLUMNS: &str = "id, patient_id, symptomes, maladie, traitements, created_at";

pub struct DiagnosticRepo;

impl DiagnosticRepo {
    /// Insert a diagnostic.
    ///
    /// A dangling `patient_id` is rejected by the foreign key with a `23503`
    /// database error and nothing is written.
    pub async fn create(pool: &PgPool, input: &CreateDiagnostic) -> Result<Diagnostic, sqlx::Error> {
        let query = format!(
            "INSERT INTO diagnostics (patient_id, symptomes, maladie, traitements)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Diagnostic>(&query)
            .bind(input.patient_id)
            .bind(&input.symptomes)
            .bind(&input.maladie)
            .bind(&input.traitements)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Diagnostic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM diagnostics WHERE id = $1");
        sqlx::query_as::<_, Diagnostic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List diagnostics, oldest first, optionally restricted to one patient.
    pub async fn list(
        pool: &PgPool,
        patient_id: Option<DbId>,
    ) -> Result<Vec<Diagnostic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM diagnostics
             WHERE ($1::BIGINT IS NULL OR patient_id = $1)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Diagnostic>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }
}
