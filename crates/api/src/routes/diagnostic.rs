//! Route definitions for the `/diagnostics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::diagnostic;
use crate::state::AppState;

/// Routes mounted at `/diagnostics`.
///
/// ```text
/// GET  /      -> list (?patient_id=)
/// POST /      -> create
/// GET  /{id}  -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(diagnostic::list).post(diagnostic::create))
        .route("/{id}", get(diagnostic::get_by_id))
}
