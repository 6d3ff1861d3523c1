pub mod admin;
pub mod auth;
pub mod diagnostic;
pub mod health;
pub mod patient;
pub mod vital_record;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /patients                     list, create
/// /patients/{id}                get
///
/// /diagnostics                  list (?patient_id=), create
/// /diagnostics/{id}             get
///
/// /vitals                       list (?patient_id=), create
/// /vitals/{id}                  get
///
/// /admin/users                  list, create (admin only)
/// /admin/users/{id}/role        change role (admin only)
/// ```
///
/// Reads need any valid token, writes need `medecin` or `admin`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/patients", patient::router())
        .nest("/diagnostics", diagnostic::router())
        .nest("/vitals", vital_record::router())
        .nest("/admin", admin::router())
}
