//! Repository for the `patients` table.

use clinique_core::types::DbId;
use sqlx::PgPool;

use crate::models::patient::{CreatePatient, Patient};

const COLUMNS: &str = "id, nom, age, sexe, telephone, adresse, groupe_sanguin, image_url, \
                       created_by, created_at";

pub struct PatientRepo;

impl PatientRepo {
    /// Insert a new patient attributed to `created_by`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        created_by: Option<DbId>,
        input: &CreatePatient,
    ) -> Result<Patient, sqlx::Error> {
        let query = format!(
            "INSERT INTO patients
                (nom, age, sexe, telephone, adresse, groupe_sanguin, image_url, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(&input.nom)
            .bind(input.age)
            .bind(&input.sexe)
            .bind(&input.telephone)
            .bind(&input.adresse)
            .bind(&input.groupe_sanguin)
            .bind(&input.image_url)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients ORDER BY id ASC");
        sqlx::query_as::<_, Patient>(&query).fetch_all(pool).await
    }
}
