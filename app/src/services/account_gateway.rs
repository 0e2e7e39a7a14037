// bistro/app/src/services/account_gateway.rs
use crate::errors::{AppError, Result};
use crate::models::{AccountOverview, Order, Profile, ProfileUpdate, Reservation};
use crate::store::RestaurantStore;
use tracing::{error, info, instrument};
use uuid::Uuid;

fn load_failed(e: AppError) -> AppError {
  error!(error = %e, "Account query failed.");
  AppError::Backend("Failed to load account data".to_string())
}

#[instrument(name = "gateway::get_profile", skip(store))]
pub async fn get_profile(store: &dyn RestaurantStore, user_id: Uuid) -> Result<Option<Profile>> {
  store.get_profile(user_id).await.map_err(load_failed)
}

#[instrument(name = "gateway::update_profile", skip(store, update))]
pub async fn update_profile(store: &dyn RestaurantStore, user_id: Uuid, update: &ProfileUpdate) -> Result<Profile> {
  let profile = store.update_profile(user_id, update).await.map_err(|e| {
    error!(error = %e, "Profile update failed.");
    AppError::Backend("Failed to update profile".to_string())
  })?;
  info!("Profile updated.");
  Ok(profile)
}

#[instrument(name = "gateway::list_orders_for_user", skip(store))]
pub async fn list_orders_for_user(store: &dyn RestaurantStore, user_id: Uuid) -> Result<Vec<Order>> {
  store.list_orders_for_user(user_id).await.map_err(load_failed)
}

#[instrument(name = "gateway::list_reservations_for_user", skip(store))]
pub async fn list_reservations_for_user(store: &dyn RestaurantStore, user_id: Uuid) -> Result<Vec<Reservation>> {
  store.list_reservations_for_user(user_id).await.map_err(load_failed)
}

/// Profile, order history and reservation history, queried concurrently.
#[instrument(name = "gateway::account_overview", skip(store))]
pub async fn account_overview(store: &dyn RestaurantStore, user_id: Uuid) -> Result<AccountOverview> {
  let (profile, orders, reservations) = futures_util::try_join!(
    get_profile(store, user_id),
    list_orders_for_user(store, user_id),
    list_reservations_for_user(store, user_id),
  )?;
  Ok(AccountOverview {
    profile,
    orders,
    reservations,
  })
}
