//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | `NotFound` | 404 | `{"error": "..."}` |
//! | `Validation` | 422 | `{"errors": ["...", ...]}` |
//! | `Store` | 500 | `{"error": "Internal server error"}` |

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use lateshow_core::{ValidationError, store::StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The store failed. Any write in progress has been rolled back; the cause
  /// is logged but never sent to the client.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }

  /// Like [`ApiError::store`], but a reference the backend could not resolve
  /// is reported as a validation failure.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    match e.missing_reference() {
      Some(v) => ApiError::Validation(v),
      None => ApiError::store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Validation(e) => {
        tracing::warn!(errors = ?e.messages, "rejected request");
        (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": e.messages })))
          .into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": "Internal server error" })),
        )
          .into_response()
      }
    }
  }
}
