//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error is rendered as `{"ok": false, "error": "..."}`. Server-side
//! failures are logged and reported with a generic message.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use matchup_core::week::WeekStart;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  Validation(String),

  #[error("no active matchup for week {0}")]
  NoActiveMatchup(WeekStart),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<matchup_core::Error> for ApiError {
  fn from(e: matchup_core::Error) -> Self {
    match e {
      matchup_core::Error::NoActiveMatchup(week) => ApiError::NoActiveMatchup(week),
      matchup_core::Error::Store(inner) => ApiError::Store(inner),
      e if e.is_validation() => ApiError::Validation(e.to_string()),
      e => ApiError::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NoActiveMatchup(_) => (StatusCode::CONFLICT, self.to_string()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
      }
    };
    (status, Json(json!({ "ok": false, "error": message }))).into_response()
  }
}
