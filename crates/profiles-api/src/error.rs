//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as `{"message": "..."}`, with an `error` field when
//! there is underlying detail to pass through.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request failed a stated constraint.
  #[error("{0}")]
  Validation(String),

  /// The username is already held by another profile.
  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  NotFound(String),

  /// The request body or path could not be decoded.
  #[error("{message}: {detail}")]
  BadRequest { message: String, detail: String },

  /// A store failure; `detail` is passed through to the caller unchanged.
  #[error("{message}")]
  Internal {
    message: String,
    detail:  Option<String>,
  },
}

impl ApiError {
  /// An internal error whose message is the store error itself.
  pub fn store(e: impl std::error::Error) -> Self {
    ApiError::Internal {
      message: e.to_string(),
      detail:  None,
    }
  }

  /// An internal error with a fixed message and the store error as detail.
  pub fn store_with(message: impl Into<String>, e: impl std::error::Error) -> Self {
    ApiError::Internal {
      message: message.into(),
      detail:  Some(e.to_string()),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::Conflict(_) | ApiError::BadRequest { .. } => {
        StatusCode::BAD_REQUEST
      }
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<profiles_core::Error> for ApiError {
  fn from(e: profiles_core::Error) -> Self {
    match e {
      profiles_core::Error::UsernameTooShort
      | profiles_core::Error::VerifiedNonCompany => {
        ApiError::Validation(e.to_string())
      }
      profiles_core::Error::Serialization(_) => ApiError::store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest {
      message: "Invalid request body".to_owned(),
      detail:  rejection.body_text(),
    }
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    ApiError::BadRequest {
      message: "Invalid profile key".to_owned(),
      detail:  rejection.body_text(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = match self {
      ApiError::Validation(m) | ApiError::Conflict(m) | ApiError::NotFound(m) => {
        json!({ "message": m })
      }
      ApiError::BadRequest { message, detail } => {
        json!({ "message": message, "error": detail })
      }
      ApiError::Internal { message, detail } => {
        tracing::error!(%message, detail = ?detail, "request failed");
        match detail {
          Some(d) => json!({ "message": message, "error": d }),
          None => json!({ "message": message }),
        }
      }
    };
    (status, Json(body)).into_response()
  }
}
