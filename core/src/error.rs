// bistro/core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failures raised by the flow engine itself, as opposed to the domain errors
/// a flow's handlers return.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Flow state type mismatch (expected {expected_type}, at: '{location}')")]
  TypeMismatch { location: String, expected_type: String },

  #[error("No flow registered for state type {state_type}")]
  NotRegistered { state_type: String },

  #[error("Error in flow handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal flow error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for FlowError {
  fn from(err: AnyhowError) -> Self {
    FlowError::HandlerError { source: err }
  }
}
