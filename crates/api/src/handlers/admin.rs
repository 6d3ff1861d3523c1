//! Handlers for the `/api/admin` resource (staff account management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clinique_core::roles::Role;
use clinique_core::types::DbId;
use clinique_db::models::user::UserResponse;
use serde::Deserialize;

use crate::auth::service::RegisterRequest;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /api/admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(flatten)]
    pub account: RegisterRequest,
    #[serde(default)]
    pub role: Role,
}

/// Request body for `PUT /api/admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.auth.list_users().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// POST /api/admin/users
///
/// Create an account with an explicit role.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .auth
        .register_with_role(&admin, &input.account, input.role)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// PUT /api/admin/users/{id}/role
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.auth.set_role(id, input.role).await?;
    Ok(Json(UserResponse::from(&user)))
}
