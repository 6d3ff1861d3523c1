use std::sync::Arc;

use clinique_db::store::ClinicalDataStore;

use crate::auth::service::AuthService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and token authorization over the credential store.
    pub auth: Arc<AuthService>,
    /// Patients, diagnostics and vital records.
    pub clinical: Arc<dyn ClinicalDataStore>,
}
