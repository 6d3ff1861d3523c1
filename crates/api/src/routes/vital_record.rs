//! Route definitions for the `/vitals` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::vital_record;
use crate::state::AppState;

/// Routes mounted at `/vitals`.
///
/// ```text
/// GET  /      -> list (?patient_id=)
/// POST /      -> create
/// GET  /{id}  -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vital_record::list).post(vital_record::create))
        .route("/{id}", get(vital_record::get_by_id))
}
