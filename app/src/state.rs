// bistro/app/src/state.rs
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::sessions::SessionStore;
use crate::store::RestaurantStore;
use bistro_core::FlowRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn RestaurantStore>,
  pub flows: Arc<FlowRegistry<AppError>>,
  pub sessions: Arc<SessionStore>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// State with every submission flow registered.
  pub fn new(store: Arc<dyn RestaurantStore>, config: Arc<AppConfig>) -> Self {
    let app_state = Self {
      store,
      flows: Arc::new(FlowRegistry::new()),
      sessions: Arc::new(SessionStore::new()),
      config,
    };
    crate::pipelines::register_all_flows(&app_state.flows, &app_state);
    app_state
  }
}
