// bistro/core/src/flow/definition.rs

//! The `Flow<T, Err>` type and its construction.

use super::control::StepControl;
use super::state::FlowState;
use super::step::{SkipCondition, StepDef};
use crate::error::FlowError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// A boxed async step handler.
///
/// Receives a clone of the run's `FlowState<T>`; must drop any lock guard
/// before awaiting.
pub type Handler<T, Err> = Box<
  dyn Fn(FlowState<T>) -> Pin<Box<dyn Future<Output = Result<StepControl, Err>> + Send>> + Send + Sync,
>;

/// Handlers attached to one step, run in phase order: before, on, after.
pub(crate) struct StepHandlers<T: 'static + Send + Sync, Err> {
  pub(crate) before: Vec<Handler<T, Err>>,
  pub(crate) on: Vec<Handler<T, Err>>,
  pub(crate) after: Vec<Handler<T, Err>>,
}

impl<T: 'static + Send + Sync, Err> Default for StepHandlers<T, Err> {
  fn default() -> Self {
    Self {
      before: Vec::new(),
      on: Vec::new(),
      after: Vec::new(),
    }
  }
}

impl<T: 'static + Send + Sync, Err> StepHandlers<T, Err> {
  pub(crate) fn is_empty(&self) -> bool {
    self.before.is_empty() && self.on.is_empty() && self.after.is_empty()
  }
}

/// An ordered list of named steps over a state type `T`, whose handlers fail
/// with `Err`.
///
/// `Err` must absorb `FlowError` so engine-level failures (a required step
/// without handlers, say) surface through the same error type as the
/// handlers' own.
pub struct Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) name: &'static str,
  pub(crate) steps: Vec<StepDef<T>>,
  pub(crate) handlers: HashMap<String, StepHandlers<T, Err>>,
}

impl<T, Err> Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Declares a flow from `(step name, optional, skip condition)` triples.
  pub fn new(name: &'static str, step_defs: &[(&str, bool, Option<SkipCondition<T>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(step_name, optional, skip_if)| StepDef {
        name: (*step_name).to_string(),
        optional: *optional,
        skip_if: skip_if.clone(),
      })
      .collect();

    Self {
      name,
      steps,
      handlers: HashMap::new(),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  /// Replaces the skip condition of an existing step.
  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<T>>) -> Result<(), FlowError> {
    let step = self
      .steps
      .iter_mut()
      .find(|s| s.name == step_name)
      .ok_or_else(|| FlowError::StepNotFound {
        step_name: step_name.to_string(),
      })?;
    step.skip_if = skip_if;
    Ok(())
  }

  /// Panics on an unknown step name: handlers are wired once at startup and a
  /// typo there is a programming error.
  pub(crate) fn handlers_for(&mut self, step_name: &str) -> &mut StepHandlers<T, Err> {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("flow '{}': step '{}' is not declared", self.name, step_name);
    }
    self.handlers.entry(step_name.to_string()).or_default()
  }
}
