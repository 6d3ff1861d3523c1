//! Static repositories, one per table. Each takes a `&PgPool` and returns raw
//! `sqlx::Error`s; constraint classification happens in [`crate::store::postgres`].

pub mod diagnostic_repo;
pub mod patient_repo;
pub mod user_repo;
pub mod vital_record_repo;

pub use diagnostic_repo::DiagnosticRepo;
pub use patient_repo::PatientRepo;
pub use user_repo::UserRepo;
pub use vital_record_repo::VitalRecordRepo;
