//! PostgreSQL-backed store built on the static repositories.

use async_trait::async_trait;
use clinique_core::roles::Role;
use clinique_core::types::DbId;

use super::{ClinicalDataStore, CredentialStore, StoreError};
use crate::models::diagnostic::{CreateDiagnostic, Diagnostic};
use crate::models::patient::{CreatePatient, Patient};
use crate::models::user::{CreateUser, User};
use crate::models::vital_record::{CreateVitalRecord, VitalRecord};
use crate::repositories::{DiagnosticRepo, PatientRepo, UserRepo, VitalRecordRepo};
use crate::DbPool;

/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

const UQ_USERS_EMAIL: &str = "uq_users_email";

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Whether `err` is a database error with the given SQLSTATE and, if given,
/// constraint name.
fn is_violation(err: &sqlx::Error, code: &str, constraint: Option<&str>) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(code)
                && constraint.map_or(true, |c| db_err.constraint() == Some(c))
        }
        _ => false,
    }
}

fn classify_child_insert(err: sqlx::Error, patient_id: DbId) -> StoreError {
    if is_violation(&err, FOREIGN_KEY_VIOLATION, None) {
        StoreError::UnknownPatient(patient_id)
    } else {
        StoreError::Database(err)
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, input).await.map_err(|err| {
            if is_violation(&err, UNIQUE_VIOLATION, Some(UQ_USERS_EMAIL)) {
                StoreError::DuplicateEmail(input.email.clone())
            } else {
                StoreError::Database(err)
            }
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn update_role(&self, id: DbId, role: Role) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::update_role(&self.pool, id, role).await?)
    }
}

#[async_trait]
impl ClinicalDataStore for PgStore {
    async fn create_patient(
        &self,
        created_by: Option<DbId>,
        input: &CreatePatient,
    ) -> Result<Patient, StoreError> {
        Ok(PatientRepo::create(&self.pool, created_by, input).await?)
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError> {
        Ok(PatientRepo::list(&self.pool).await?)
    }

    async fn find_patient(&self, id: DbId) -> Result<Option<Patient>, StoreError> {
        Ok(PatientRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_diagnostic(&self, input: &CreateDiagnostic) -> Result<Diagnostic, StoreError> {
        DiagnosticRepo::create(&self.pool, input)
            .await
            .map_err(|err| classify_child_insert(err, input.patient_id))
    }

    async fn list_diagnostics(
        &self,
        patient_id: Option<DbId>,
    ) -> Result<Vec<Diagnostic>, StoreError> {
        Ok(DiagnosticRepo::list(&self.pool, patient_id).await?)
    }

    async fn find_diagnostic(&self, id: DbId) -> Result<Option<Diagnostic>, StoreError> {
        Ok(DiagnosticRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_vital_record(
        &self,
        input: &CreateVitalRecord,
    ) -> Result<VitalRecord, StoreError> {
        VitalRecordRepo::create(&self.pool, input)
            .await
            .map_err(|err| classify_child_insert(err, input.patient_id))
    }

    async fn list_vital_records(
        &self,
        patient_id: Option<DbId>,
    ) -> Result<Vec<VitalRecord>, StoreError> {
        Ok(VitalRecordRepo::list(&self.pool, patient_id).await?)
    }

    async fn find_vital_record(&self, id: DbId) -> Result<Option<VitalRecord>, StoreError> {
        Ok(VitalRecordRepo::find_by_id(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
