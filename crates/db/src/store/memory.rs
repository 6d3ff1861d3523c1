//! In-process store with the same contract as [`super::PgStore`].
//!
//! Ids are assigned sequentially from 1 per table. Each write runs its
//! existence/uniqueness check and insert under one write lock, so concurrent
//! callers see the same atomicity the database provides.

use async_trait::async_trait;
use chrono::Utc;
use clinique_core::roles::Role;
use clinique_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use super::{ClinicalDataStore, CredentialStore, StoreError};
use crate::models::diagnostic::{CreateDiagnostic, Diagnostic};
use crate::models::patient::{CreatePatient, Patient};
use crate::models::user::{CreateUser, User};
use crate::models::vital_record::{CreateVitalRecord, VitalRecord};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    patients: Vec<Patient>,
    diagnostics: Vec<Diagnostic>,
    vital_records: Vec<VitalRecord>,
    /// Latest `created_at` handed out; keeps timestamps non-decreasing.
    clock: Option<Timestamp>,
}

impl Tables {
    fn now(&mut self) -> Timestamp {
        let now = Utc::now();
        let stamped = match self.clock {
            Some(last) if last > now => last,
            _ => now,
        };
        self.clock = Some(stamped);
        stamped
    }

    fn patient_exists(&self, id: DbId) -> bool {
        self.patients.iter().any(|p| p.id == id)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(len: usize) -> DbId {
    len as DbId + 1
}

fn by_creation<T>(mut rows: Vec<T>, key: impl Fn(&T) -> (Timestamp, DbId)) -> Vec<T> {
    rows.sort_by_key(|row| key(row));
    rows
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == input.email) {
            return Err(StoreError::DuplicateEmail(input.email.clone()));
        }
        let user = User {
            id: next_id(tables.users.len()),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role,
            created_at: tables.now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn update_role(&self, id: DbId, role: Role) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|u| {
            u.role = role;
            u.clone()
        }))
    }
}

#[async_trait]
impl ClinicalDataStore for MemoryStore {
    async fn create_patient(
        &self,
        created_by: Option<DbId>,
        input: &CreatePatient,
    ) -> Result<Patient, StoreError> {
        let mut tables = self.tables.write().await;
        let patient = Patient {
            id: next_id(tables.patients.len()),
            nom: input.nom.clone(),
            age: input.age,
            sexe: input.sexe.clone(),
            telephone: input.telephone.clone(),
            adresse: input.adresse.clone(),
            groupe_sanguin: input.groupe_sanguin.clone(),
            image_url: input.image_url.clone(),
            created_by,
            created_at: tables.now(),
        };
        tables.patients.push(patient.clone());
        Ok(patient)
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StoreError> {
        Ok(self.tables.read().await.patients.clone())
    }

    async fn find_patient(&self, id: DbId) -> Result<Option<Patient>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.patients.iter().find(|p| p.id == id).cloned())
    }

    async fn create_diagnostic(&self, input: &CreateDiagnostic) -> Result<Diagnostic, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.patient_exists(input.patient_id) {
            return Err(StoreError::UnknownPatient(input.patient_id));
        }
        let diagnostic = Diagnostic {
            id: next_id(tables.diagnostics.len()),
            patient_id: input.patient_id,
            symptomes: input.symptomes.clone(),
            maladie: input.maladie.clone(),
            traitements: input.traitements.clone(),
            created_at: tables.now(),
        };
        tables.diagnostics.push(diagnostic.clone());
        Ok(diagnostic)
    }

    async fn list_diagnostics(
        &self,
        patient_id: Option<DbId>,
    ) -> Result<Vec<Diagnostic>, StoreError> {
        let tables = self.tables.read().await;
        let rows: Vec<Diagnostic> = tables
            .diagnostics
            .iter()
            .filter(|d| patient_id.map_or(true, |pid| d.patient_id == pid))
            .cloned()
            .collect();
        Ok(by_creation(rows, |d| (d.created_at, d.id)))
    }

    async fn find_diagnostic(&self, id: DbId) -> Result<Option<Diagnostic>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.diagnostics.iter().find(|d| d.id == id).cloned())
    }

    async fn create_vital_record(
        &self,
        input: &CreateVitalRecord,
    ) -> Result<VitalRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.patient_exists(input.patient_id) {
            return Err(StoreError::UnknownPatient(input.patient_id));
        }
        let record = VitalRecord {
            id: next_id(tables.vital_records.len()),
            patient_id: input.patient_id,
            temperature: input.temperature,
            tension: input.tension.clone(),
            frequence_cardiaque: input.frequence_cardiaque,
            saturation: input.saturation,
            respiration: input.respiration,
            poids: input.poids,
            taille: input.taille,
            created_at: tables.now(),
        };
        tables.vital_records.push(record.clone());
        Ok(record)
    }

    async fn list_vital_records(
        &self,
        patient_id: Option<DbId>,
    ) -> Result<Vec<VitalRecord>, StoreError> {
        let tables = self.tables.read().await;
        let rows: Vec<VitalRecord> = tables
            .vital_records
            .iter()
            .filter(|v| patient_id.map_or(true, |pid| v.patient_id == pid))
            .cloned()
            .collect();
        Ok(by_creation(rows, |v| (v.created_at, v.id)))
    }

    async fn find_vital_record(&self, id: DbId) -> Result<Option<VitalRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.vital_records.iter().find(|v| v.id == id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
