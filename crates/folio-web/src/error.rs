//! Error types and their [`IntoResponse`] implementations.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use folio_core::{ErrorKind, application::SubmitError, validate::ValidationError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// An error returned by a catalog or page handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl From<folio_core::Error> for ApiError {
  fn from(err: folio_core::Error) -> Self {
    match err.kind() {
      ErrorKind::Validation => Self::BadRequest(err.to_string()),
      ErrorKind::NotFound => Self::NotFound(err.to_string()),
      ErrorKind::Conflict => Self::Conflict(err.to_string()),
      ErrorKind::Internal => Self::Internal(err.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m),
      ApiError::Internal(m) => {
        error!(error = %m, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

// ─── Contact form ────────────────────────────────────────────────────────────

pub const INVALID_FORM_MESSAGE: &str = "Please check all required fields and try again.";
pub const SUBMIT_FAILED_MESSAGE: &str =
  "Sorry, there was an error processing your request. Please try again later.";

/// Why `POST /contact` did not succeed.
///
/// Everything except [`FormError::Failed`] is the submitter's fault and maps
/// to 400.
#[derive(Debug, Error)]
pub enum FormError {
  #[error("malformed request body: {0}")]
  Malformed(String),

  #[error("{0}")]
  Binding(#[from] validator::ValidationErrors),

  #[error("{0}")]
  Rejected(ValidationError),

  #[error("{0}")]
  Failed(#[source] folio_core::Error),
}

impl From<SubmitError> for FormError {
  fn from(err: SubmitError) -> Self {
    match err {
      SubmitError::Validation(e) => Self::Rejected(e),
      SubmitError::Save(e) => Self::Failed(e),
    }
  }
}

impl IntoResponse for FormError {
  fn into_response(self) -> Response {
    match self {
      FormError::Failed(e) => {
        error!(error = %e, "contact submission failed");
        let body = json!({ "success": false, "message": SUBMIT_FAILED_MESSAGE });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
      }
      other => {
        let body = json!({
          "success": false,
          "message": INVALID_FORM_MESSAGE,
          "error":   other.to_string(),
        });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
      }
    }
  }
}
