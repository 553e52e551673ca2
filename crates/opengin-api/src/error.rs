//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error is rendered as `{"error": "...", "details": "..."}`.
//! Backend rejections keep the backend's status code; `details` carries the
//! backend's raw response body.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use opengin_core::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error(transparent)]
  Gateway(#[from] CoreError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
  error:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  details: Option<String>,
}

impl ApiError {
  fn parts(self) -> (StatusCode, ErrorBody) {
    let body = |error: String, details: Option<String>| ErrorBody { error, details };
    match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, body(m, None)),
      ApiError::Gateway(CoreError::Backend { status, status_text, body: raw }) => (
        StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
        body(format!("Backend API error: {status_text}"), Some(raw)),
      ),
      ApiError::Gateway(CoreError::Transport(m)) => (
        StatusCode::BAD_GATEWAY,
        body("Failed to reach backend".into(), Some(m)),
      ),
      ApiError::Gateway(CoreError::Decode(m)) => (
        StatusCode::BAD_GATEWAY,
        body("Unexpected backend response".into(), Some(m)),
      ),
      ApiError::Gateway(CoreError::Invalid(m)) => (StatusCode::BAD_REQUEST, body(m, None)),
      ApiError::Gateway(e) => (StatusCode::INTERNAL_SERVER_ERROR, body(e.to_string(), None)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = self.parts();
    (status, Json(body)).into_response()
  }
}
