//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use arcadia_core::Error as CoreError;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("storage fault: {0}")]
  Storage(String),
}

/// Map the domain taxonomy onto transport-level failures. Storage faults
/// keep their detail here and lose it at response time.
impl From<CoreError> for ApiError {
  fn from(e: CoreError) -> Self {
    let message = e.to_string();
    match e {
      CoreError::NotPurchased { .. }
      | CoreError::AdminsMayNotReview
      | CoreError::AdminRequired
      | CoreError::NotReviewAuthor(_) => Self::Forbidden(message),

      CoreError::MissingField(_) | CoreError::RatingOutOfRange { .. } => {
        Self::BadRequest(message)
      }

      CoreError::DuplicateReview { .. } | CoreError::UsernameTaken(_) => {
        Self::Conflict(message)
      }

      CoreError::GameNotFound(_) | CoreError::ReviewNotFound(_) => {
        Self::NotFound(message)
      }

      CoreError::Storage(m) => Self::Storage(m),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "error": "unauthorized" })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"arcadia\""),
        );
        return res;
      }
      ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Storage(m) => {
        // Logged server-side; callers get a generic failure.
        tracing::error!(error = %m, "storage fault");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "internal storage error".to_string(),
        )
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
