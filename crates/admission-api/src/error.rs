//! API error type and [`axum::response::IntoResponse`] implementation.

use admission_core::{
  error::{AssistantError, AuthError, IntakeError, ValidationError},
  intake::SubmitError,
};
use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing or wrong Basic credentials on an admin route.
  #[error("unauthorized")]
  Unauthorized,

  /// A login attempt with the wrong credentials.
  #[error(transparent)]
  InvalidCredentials(#[from] AuthError),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("{0}")]
  Unprocessable(String),

  #[error("{0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store(Box::new(e))
  }

  pub fn application_not_found(id: &str) -> Self {
    ApiError::NotFound(format!("application {id}"))
  }
}

impl From<ValidationError> for ApiError {
  fn from(e: ValidationError) -> Self { ApiError::Unprocessable(e.to_string()) }
}

impl From<IntakeError> for ApiError {
  fn from(e: IntakeError) -> Self { ApiError::Unprocessable(e.to_string()) }
}

impl From<AssistantError> for ApiError {
  fn from(e: AssistantError) -> Self {
    match e {
      AssistantError::EmptyMessage => ApiError::Unprocessable(e.to_string()),
      AssistantError::ReplyPending => ApiError::Conflict(e.to_string()),
    }
  }
}

impl<E> From<SubmitError<E>> for ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn from(e: SubmitError<E>) -> Self {
    match e {
      SubmitError::Rejected(e) => e.into(),
      SubmitError::Store(e) => ApiError::store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
      ApiError::InvalidCredentials(e) => (StatusCode::UNAUTHORIZED, e.to_string()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    let mut res = (status, Json(json!({ "error": message }))).into_response();
    if matches!(self, ApiError::Unauthorized) {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"admission\""),
      );
    }
    res
  }
}
