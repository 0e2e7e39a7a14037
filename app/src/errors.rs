// bistro/app/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use bistro_core::{FlowError, FormError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Database(#[from] sqlx::Error),

  /// A store rejected the operation without a database error behind it.
  #[error("Backend Error: {0}")]
  Backend(String),

  #[error("Flow Error: {source}")]
  Flow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),

  #[error("Flow execution was halted by a handler.")]
  FlowHalted,
}

impl From<FormError> for AppError {
  fn from(err: FormError) -> Self {
    AppError::Validation(err.to_string())
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::FlowHalted => StatusCode::CONFLICT,
      AppError::Config(_)
      | AppError::Database(_)
      | AppError::Backend(_)
      | AppError::Flow { .. }
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    let mut builder = HttpResponse::build(self.status_code());
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) | AppError::Backend(m) => {
        builder.json(json!({"error": m}))
      }
      AppError::Config(m) => builder.json(json!({"error": "Configuration issue", "detail": m})),
      AppError::Database(_) => builder.json(json!({"error": "The request could not be completed. Please try again."})),
      AppError::Flow { source } => {
        tracing::error!(flow_error_source = ?source, "Flow error details");
        builder.json(json!({"error": "Workflow processing error"}))
      }
      AppError::Internal(_) => builder.json(json!({"error": "An internal error occurred"})),
      AppError::FlowHalted => builder.json(json!({"error": "Process halted by business logic."})),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn form_errors_become_bad_requests_with_their_message() {
    let err = AppError::from(FormError::EmptyCart);
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert!(matches!(err, AppError::Validation(ref m) if m == "Cart is empty"));
  }

  #[test]
  fn backend_failures_are_server_errors() {
    assert_eq!(
      AppError::Backend("order_items insert failed".into()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(AppError::Database(sqlx::Error::RowNotFound).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(AppError::FlowHalted.status_code(), StatusCode::CONFLICT);
  }
}
