//! HTTP-level integration tests for registration, login and token checks.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_201_with_token_and_medecin_user() {
    let app = common::build_test_app().await;
    let body = json!({ "name": "Dr. A", "email": "a@x.com", "password": "pw1" });

    let response = post_json(app, "/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["name"], "Dr. A");
    assert_eq!(json["user"]["email"], "a@x.com");
    assert_eq!(json["user"]["role"], "medecin");
    assert!(json["user"].get("password_hash").is_none(), "hash must never leak");
}

#[tokio::test]
async fn duplicate_email_returns_409() {
    let app = common::build_test_app().await;
    common::register(&app, "Dr. A", "a@x.com", "pw1").await;

    let body = json!({ "name": "Dr. B", "email": "a@x.com", "password": "other" });
    let response = post_json(app, "/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn register_with_invalid_email_returns_400() {
    let app = common::build_test_app().await;
    let body = json!({ "name": "Dr. A", "email": "not-an-email", "password": "pw1" });

    let response = post_json(app, "/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn register_cannot_choose_its_role() {
    let app = common::build_test_app().await;
    let body = json!({ "name": "Eve", "email": "eve@x.com", "password": "pw1", "role": "admin" });

    let response = post_json(app, "/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["user"]["role"], "medecin");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_returns_token_for_valid_credentials() {
    let app = common::build_test_app().await;
    common::register(&app, "Dr. A", "a@x.com", "pw1").await;

    let response = post_json(app, "/auth/login", json!({ "email": "a@x.com", "password": "pw1" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = common::build_test_app().await;
    common::register(&app, "Dr. A", "a@x.com", "pw1").await;

    let wrong_password =
        post_json(app.clone(), "/auth/login", json!({ "email": "a@x.com", "password": "nope" })).await;
    let unknown_email =
        post_json(app, "/auth/login", json!({ "email": "ghost@x.com", "password": "pw1" })).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a, b);
    assert_eq!(a["code"], "INVALID_CREDENTIALS");
}

// ---------------------------------------------------------------------------
// Token checks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_returns_current_user() {
    let app = common::build_test_app().await;
    let token = common::register(&app, "Dr. A", "a@x.com", "pw1").await;

    let response = get_auth(app, "/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["email"], "a@x.com");
    assert_eq!(json["role"], "medecin");
}

#[tokio::test]
async fn missing_token_returns_401() {
    let app = common::build_test_app().await;

    let response = get(app, "/api/patients").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let app = common::build_test_app().await;

    let response = get_auth(app, "/auth/me", "not.a.token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_returns_401() {
    use clinique_api::auth::jwt::{JwtConfig, TokenService};
    use clinique_core::roles::Role;

    let app = common::build_test_app().await;
    let forged = TokenService::new(JwtConfig {
        secret: "some-other-secret".to_string(),
        expiry_mins: 60,
    })
    .issue(1, Role::Admin)
    .unwrap();

    let response = get_auth(app, "/api/admin/users", &forged).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
