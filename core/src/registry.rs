// bistro/core/src/registry.rs

//! `FlowRegistry<E>`: holds one flow per state type and runs it on demand.
//!
//! Flows are registered once at startup; request handlers only know the state
//! type they built, so dispatch is keyed by `TypeId::of::<T>()`.

use crate::error::FlowError;
use crate::flow::{Flow, FlowOutcome, FlowState};

use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[async_trait]
trait ErasedFlow<AppErr>: Send + Sync
where
  AppErr: std::error::Error + Send + Sync + 'static,
{
  fn flow_name(&self) -> &'static str;

  /// `state` must hold a `FlowState<T>` for the wrapped flow's `T`.
  async fn run_erased(&self, state: Box<dyn Any + Send>) -> Result<FlowOutcome, AppErr>;
}

struct RegisteredFlow<T, HandlerErr, AppErr>
where
  T: 'static + Send + Sync,
  HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  flow: Flow<T, HandlerErr>,
  _app_err: PhantomData<fn() -> AppErr>,
}

#[async_trait]
impl<T, HandlerErr, AppErr> ErasedFlow<AppErr> for RegisteredFlow<T, HandlerErr, AppErr>
where
  T: 'static + Send + Sync,
  HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<HandlerErr> + From<FlowError> + Send + Sync + 'static,
{
  fn flow_name(&self) -> &'static str {
    self.flow.name()
  }

  async fn run_erased(&self, state: Box<dyn Any + Send>) -> Result<FlowOutcome, AppErr> {
    let typed = state.downcast::<FlowState<T>>().map_err(|_| {
      AppErr::from(FlowError::TypeMismatch {
        location: format!("registry dispatch for flow '{}'", self.flow.name()),
        expected_type: std::any::type_name::<FlowState<T>>().to_string(),
      })
    })?;
    self.flow.run(*typed).await.map_err(AppErr::from)
  }
}

/// Registry of flows, returning `AppErr` from every run.
pub struct FlowRegistry<AppErr = FlowError>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  flows: RwLock<HashMap<TypeId, Arc<dyn ErasedFlow<AppErr>>>>,
}

impl<AppErr> Default for FlowRegistry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<AppErr> FlowRegistry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      flows: RwLock::new(HashMap::new()),
    }
  }

  /// Registers `flow` for its state type, replacing any earlier flow for the
  /// same type.
  pub fn register<T, HandlerErr>(&self, flow: Flow<T, HandlerErr>)
  where
    T: 'static + Send + Sync,
    HandlerErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
    AppErr: From<HandlerErr>,
  {
    event!(Level::DEBUG, flow = flow.name(), state_type = %std::any::type_name::<T>(), "Registering flow.");
    let entry: Arc<dyn ErasedFlow<AppErr>> = Arc::new(RegisteredFlow::<T, HandlerErr, AppErr> {
      flow,
      _app_err: PhantomData,
    });
    if let Some(previous) = self.flows.write().insert(TypeId::of::<T>(), entry) {
      event!(Level::WARN, replaced = previous.flow_name(), "Flow registration replaced an existing flow.");
    }
  }

  pub fn contains<T: 'static + Send + Sync>(&self) -> bool {
    self.flows.read().contains_key(&TypeId::of::<T>())
  }

  /// Runs the flow registered for `T` against `state`.
  #[instrument(name = "FlowRegistry::run", skip_all, fields(state_type = %std::any::type_name::<T>()))]
  pub async fn run<T: 'static + Send + Sync>(&self, state: FlowState<T>) -> Result<FlowOutcome, AppErr> {
    let flow = self.flows.read().get(&TypeId::of::<T>()).cloned();
    let flow = flow.ok_or_else(|| {
      let state_type = std::any::type_name::<T>().to_string();
      event!(Level::ERROR, %state_type, "No flow registered for state type.");
      AppErr::from(FlowError::NotRegistered { state_type })
    })?;
    flow.run_erased(Box::new(state)).await
  }
}
