//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::{FromRequest, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rollbook_core::{
  Rejection,
  store::{Failure, StoreError},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// The validation engine refused the write.
  #[error(transparent)]
  Rejected(Rejection),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error.
  pub fn store<E: StoreError>(err: E) -> Self {
    match err.failure() {
      Failure::Rejected(rejection) => ApiError::Rejected(rejection),
      Failure::NotFound => ApiError::NotFound(err.to_string()),
      Failure::Conflict => ApiError::Conflict(err.to_string()),
      Failure::Invalid => ApiError::BadRequest(err.to_string()),
      Failure::Internal => ApiError::Store(Box::new(err)),
    }
  }
}

impl From<rollbook_core::Error> for ApiError {
  fn from(err: rollbook_core::Error) -> Self {
    match err {
      rollbook_core::Error::Rejected(rejection) => ApiError::Rejected(rejection),
      other => ApiError::BadRequest(other.to_string()),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

/// [`Json`] whose rejections answer as [`ApiError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, json!({ "error": m })),
      ApiError::Rejected(r) => (
        StatusCode::CONFLICT,
        json!({ "error": r.to_string(), "kind": r.kind() }),
      ),
      ApiError::Store(e) => {
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": e.to_string() }))
      }
    };
    (status, Json(body)).into_response()
  }
}
