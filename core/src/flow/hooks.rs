// bistro/core/src/flow/hooks.rs

//! Registration of `before`, `on` and `after` handlers.
//!
//! Each registration accepts any async closure over `FlowState<T>` whose error
//! converts into the flow's `Err`, and boxes it into a [`Handler`].

use super::control::StepControl;
use super::definition::{Flow, Handler};
use super::state::FlowState;
use crate::error::FlowError;
use std::future::Future;

fn boxed<T, F, Err, UserErr>(handler_fn: impl Fn(FlowState<T>) -> F + Send + Sync + 'static) -> Handler<T, Err>
where
  T: 'static + Send + Sync,
  F: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
  UserErr: Into<Err> + Send + Sync + 'static,
  Err: Send + 'static,
{
  Box::new(move |state| {
    let fut = handler_fn(state);
    Box::pin(async move { fut.await.map_err(Into::into) })
  })
}

impl<T, Err> Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn before_step<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(FlowState<T>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    let handler = boxed(handler_fn);
    self.handlers_for(step_name).before.push(handler);
  }

  pub fn on_step<F, UserErr>(&mut self, step_name: &str, handler_fn: impl Fn(FlowState<T>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    let handler = boxed(handler_fn);
    self.handlers_for(step_name).on.push(handler);
  }

  pub fn after_step<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(FlowState<T>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    let handler = boxed(handler_fn);
    self.handlers_for(step_name).after.push(handler);
  }

  /// Registers an already boxed handler for the `on` phase.
  pub fn on_step_boxed(&mut self, step_name: &str, handler: Handler<T, Err>) {
    self.handlers_for(step_name).on.push(handler);
  }
}
