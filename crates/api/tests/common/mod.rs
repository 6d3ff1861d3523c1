#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use clinique_api::auth::jwt::{JwtConfig, TokenService};
use clinique_api::auth::password::Argon2Hasher;
use clinique_api::auth::service::AuthService;
use clinique_api::config::ServerConfig;
use clinique_api::router::build_app_router;
use clinique_api::state::AppState;
use clinique_db::store::MemoryStore;

pub const ADMIN_EMAIL: &str = "admin@clinic.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        password_min_length: 1,
        admin_seed: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 60,
        },
    }
}

/// Build the production router over a fresh in-memory store, with the
/// bootstrap admin already created.
pub async fn build_test_app() -> Router {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());

    let auth = Arc::new(AuthService::new(
        store.clone(),
        Arc::new(Argon2Hasher),
        TokenService::new(config.jwt.clone()),
        config.password_min_length,
    ));
    auth.ensure_admin("Dr. Admin", ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("admin seeding should succeed");

    let state = AppState {
        auth,
        clinical: store,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

/// POST a raw (possibly malformed) JSON body.
pub async fn post_raw_auth(app: Router, uri: &str, body: &'static str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register a `medecin` account and return its token.
pub async fn register(app: &Router, name: &str, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "name": name, "email": email, "password": password });
    let response = post_json(app.clone(), "/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

/// Log in and return the token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app.clone(), "/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

pub async fn admin_token(app: &Router) -> String {
    login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}
