// bistro/app/src/lib.rs

//! HTTP service for the Artisan Bistro: menu, cart, ordering, reservations
//! and the account page, over PostgreSQL or an in-memory store.

pub mod config;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod services;
pub mod sessions;
pub mod state;
pub mod store;
pub mod web;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, RestaurantStore, SampleMenu};
use std::sync::Arc;

/// Picks the store the config asks for and prepares it: migrations and
/// seeding for PostgreSQL, the sample menu for the in-memory store.
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn RestaurantStore>> {
  if config.database_url.is_none() {
    tracing::warn!("DATABASE_URL is not set; using the in-memory store with the sample menu.");
    return Ok(Arc::new(MemoryStore::with_menu(&SampleMenu::new())));
  }

  let store = PgStore::connect(config).await?;
  if config.run_migrations {
    store.run_migrations().await?;
  }
  if config.seed_db {
    let seeded = store.seed_menu_if_empty(&SampleMenu::new()).await?;
    tracing::info!(seeded, "Database seeding checked.");
  }
  Ok(Arc::new(store))
}

pub async fn build_app_state(config: AppConfig) -> Result<AppState> {
  let store = build_store(&config).await?;
  Ok(AppState::new(store, Arc::new(config)))
}
