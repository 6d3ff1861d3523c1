//! Role-based access control (RBAC) extractors.
//!
//! Each extractor authenticates the bearer token and rejects requests whose
//! role does not meet the minimum requirement: 401 for a missing or invalid
//! token, 403 for a valid token with an insufficient role.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clinique_core::roles::Role;

use super::auth::{authorize_parts, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize_parts(parts, state, Some(Role::Admin)).map(RequireAdmin)
    }
}

/// Requires a role allowed to write clinical records (`medecin` or `admin`).
pub struct RequireClinician(pub AuthUser);

impl FromRequestParts<AppState> for RequireClinician {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize_parts(parts, state, Some(Role::Medecin)).map(RequireClinician)
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize_parts(parts, state, None).map(RequireAuth)
    }
}
