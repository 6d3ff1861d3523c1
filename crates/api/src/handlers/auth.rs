//! Handlers for the `/auth` resource (register, login, current user).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clinique_db::models::user::{User, UserResponse};
use serde::{Deserialize, Serialize};

use crate::auth::service::RegisterRequest;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

fn auth_response(state: &AppState, token: String, user: &User) -> AuthResponse {
    AuthResponse {
        token,
        expires_in: state.auth.tokens().expires_in(),
        user: UserResponse::from(user),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/register
///
/// Create a `medecin` account and return a token for it.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let user = state.auth.register(&input).await?;
    let token = state.auth.issue_token(&user)?;
    Ok((StatusCode::CREATED, Json(auth_response(&state, token, &user))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (token, user) = state.auth.login(&input.email, &input.password).await?;
    Ok(Json(auth_response(&state, token, &user)))
}

/// GET /auth/me
pub async fn me(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = state.auth.current_user(auth_user.user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}
