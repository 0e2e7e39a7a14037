// bistro/app/src/pipelines/mod.rs

//! Declares and registers the submission flows.

use crate::errors::AppError;
use crate::state::AppState;
use bistro_core::FlowRegistry;

pub mod contexts;
pub mod order_pipeline;
pub mod reservation_pipeline;

/// Registers every flow with `registry`. Called once while building the
/// application state.
pub fn register_all_flows(registry: &FlowRegistry<AppError>, app_state: &AppState) {
  tracing::info!("Registering submission flows...");

  order_pipeline::register_order_pipeline(registry, app_state);
  reservation_pipeline::register_reservation_pipeline(registry, app_state);

  tracing::info!("All submission flows registered.");
}
