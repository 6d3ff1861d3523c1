//! Storage traits consumed by the API layer.
//!
//! - [`CredentialStore`] -- staff accounts.
//! - [`ClinicalDataStore`] -- patients and the records scoped under them.
//!
//! [`PgStore`] is the production implementation; [`MemoryStore`] backs tests
//! and database-less development runs.

use async_trait::async_trait;
use clinique_core::roles::Role;
use clinique_core::types::DbId;

use crate::models::diagnostic::{CreateDiagnostic, Diagnostic};
use crate::models::patient::{CreatePatient, Patient};
use crate::models::user::{CreateUser, User};
use crate::models::vital_record::{CreateVitalRecord, VitalRecord};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors surfaced by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Patient {0} does not exist")]
    UnknownPatient(DbId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist a new user. Fails with [`StoreError::DuplicateEmail`] if the
    /// email is already registered.
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;

    /// All users in registration order.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Returns `None` if the user does not exist.
    async fn update_role(&self, id: DbId, role: Role) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait ClinicalDataStore: Send + Sync {
    async fn create_patient(
        &self,
        created_by: Option<DbId>,
        input: &CreatePatient,
    ) -> Result<Patient, StoreError>;

    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError>;

    async fn find_patient(&self, id: DbId) -> Result<Option<Patient>, StoreError>;

    /// Fails with [`StoreError::UnknownPatient`] and writes nothing when
    /// `input.patient_id` does not resolve.
    async fn create_diagnostic(&self, input: &CreateDiagnostic) -> Result<Diagnostic, StoreError>;

    /// Oldest first; ties broken by insertion order.
    async fn list_diagnostics(&self, patient_id: Option<DbId>)
        -> Result<Vec<Diagnostic>, StoreError>;

    async fn find_diagnostic(&self, id: DbId) -> Result<Option<Diagnostic>, StoreError>;

    async fn create_vital_record(
        &self,
        input: &CreateVitalRecord,
    ) -> Result<VitalRecord, StoreError>;

    async fn list_vital_records(
        &self,
        patient_id: Option<DbId>,
    ) -> Result<Vec<VitalRecord>, StoreError>;

    async fn find_vital_record(&self, id: DbId) -> Result<Option<VitalRecord>, StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
