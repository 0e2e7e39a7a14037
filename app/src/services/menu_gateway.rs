// bistro/app/src/services/menu_gateway.rs
use crate::errors::{AppError, Result};
use crate::store::RestaurantStore;
use bistro_core::{MenuCategory, MenuItem};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct Menu {
  pub categories: Vec<MenuCategory>,
  pub items: Vec<MenuItem>,
}

fn load_failed(e: AppError) -> AppError {
  error!(error = %e, "Menu query failed.");
  AppError::Backend("Failed to load menu".to_string())
}

#[instrument(name = "gateway::list_menu_categories", skip(store))]
pub async fn list_menu_categories(store: &dyn RestaurantStore) -> Result<Vec<MenuCategory>> {
  store.list_menu_categories().await.map_err(load_failed)
}

#[instrument(name = "gateway::list_menu_items", skip(store))]
pub async fn list_menu_items(store: &dyn RestaurantStore, category_id: Option<Uuid>) -> Result<Vec<MenuItem>> {
  store.list_menu_items(category_id).await.map_err(load_failed)
}

/// Categories and items, fetched together.
#[instrument(name = "gateway::load_menu", skip(store))]
pub async fn load_menu(store: &dyn RestaurantStore) -> Result<Menu> {
  let (categories, items) = futures_util::try_join!(list_menu_categories(store), list_menu_items(store, None))?;
  info!(categories = categories.len(), items = items.len(), "Menu loaded.");
  Ok(Menu { categories, items })
}

/// An item that may be put in a cart: it must exist and be available.
#[instrument(name = "gateway::get_orderable_item", skip(store))]
pub async fn get_orderable_item(store: &dyn RestaurantStore, id: Uuid) -> Result<MenuItem> {
  let item = store
    .get_menu_item(id)
    .await
    .map_err(load_failed)?
    .ok_or_else(|| {
      warn!(menu_item_id = %id, "Menu item not found.");
      AppError::NotFound(format!("Menu item {} not found", id))
    })?;
  if !item.is_orderable() {
    warn!(menu_item_id = %id, "Menu item is currently unavailable.");
    return Err(AppError::Validation(format!("{} is currently unavailable", item.name)));
  }
  Ok(item)
}
