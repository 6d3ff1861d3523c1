//! Repository for the `vital_records` table.

use clinique_core::types::DbId;
use sqlx::PgPool;

use crate::models::vital_record::{CreateVitalRecord, VitalRecord};

const COLUMNS: &str = "id, patient_id, temperature, tension, frequence_cardiaque, saturation, \
                       respiration, poids, taille, created_at";

pub struct VitalRecordRepo;

impl VitalRecordRepo {
    /// Insert a vital-sign record. Same foreign-key behaviour as diagnostics.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVitalRecord,
    ) -> Result<VitalRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO vital_records
                (patient_id, temperature, tension, frequence_cardiaque, saturation,
                 respiration, poids, taille)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VitalRecord>(&query)
            .bind(input.patient_id)
            .bind(input.temperature)
            .bind(&input.tension)
            .bind(input.frequence_cardiaque)
            .bind(input.saturation)
            .bind(input.respiration)
            .bind(input.poids)
            .bind(input.taille)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VitalRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vital_records WHERE id = $1");
        sqlx::query_as::<_, VitalRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List vital records, oldest first, optionally restricted to one patient.
    pub async fn list(
        pool: &PgPool,
        patient_id: Option<DbId>,
    ) -> Result<Vec<VitalRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vital_records
             WHERE ($1::BIGINT IS NULL OR patient_id = $1)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, VitalRecord>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }
}
