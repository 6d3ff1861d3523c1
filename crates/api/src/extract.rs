//! Body, path and query extractors whose rejections use the JSON error envelope.
//!
//! Axum's stock `Json` / `Path` / `Query` reject with plain-text bodies; these wrappers
//! convert the rejection into [`AppError::BadRequest`] (or a validation error for
//! well-formed JSON of the wrong shape) so every 4xx carries a machine-readable
//! `code`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::body::Body;
use axum::http::request::Parts;
use axum::http::Request;
use clinique_core::error::CoreError;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Drop-in replacement for `axum::Json` on the request side.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

/// Drop-in replacement for `axum::extract::Query`.
pub struct AppQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(AppQuery(value)),
            Err(rejection) => Err(query_rejection(rejection)),
        }
    }
}

/// Drop-in replacement for `axum::extract::Path`.
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(AppPath(value)),
            Err(rejection) => Err(path_rejection(rejection)),
        }
    }
}

/// Well-formed JSON with a missing or mistyped field is a validation failure;
/// anything else (syntax, content type, unreadable body) is a bad request.
fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            AppError::Core(CoreError::Validation(err.body_text()))
        }
        other => AppError::BadRequest(other.body_text()),
    }
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

fn path_rejection(rejection: PathRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}
