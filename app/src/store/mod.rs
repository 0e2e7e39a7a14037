// bistro/app/src/store/mod.rs

//! The backend boundary: typed inserts, selects and updates over the
//! restaurant tables.

pub mod memory;
pub mod postgres;
pub mod seed;

use crate::errors::Result;
use crate::models::{Order, PlacedOrder, Profile, ProfileUpdate, Reservation};
use async_trait::async_trait;
use bistro_core::{MenuCategory, MenuItem, OrderDraft, ReservationDraft};
use uuid::Uuid;

pub use memory::{FailurePoint, MemoryStore};
pub use postgres::PgStore;
pub use seed::SampleMenu;

#[async_trait]
pub trait RestaurantStore: Send + Sync {
  fn backend_tag(&self) -> &'static str;

  /// Categories by ascending display order, those without one last.
  async fn list_menu_categories(&self) -> Result<Vec<MenuCategory>>;

  /// Items by ascending display order, optionally limited to one category.
  async fn list_menu_items(&self, category_id: Option<Uuid>) -> Result<Vec<MenuItem>>;

  async fn get_menu_item(&self, id: Uuid) -> Result<Option<MenuItem>>;

  /// Writes the order and one item per draft line, all or nothing. The order
  /// starts out `pending`.
  async fn place_order(&self, user_id: Option<Uuid>, draft: &OrderDraft) -> Result<PlacedOrder>;

  async fn create_reservation(&self, user_id: Option<Uuid>, draft: &ReservationDraft) -> Result<Reservation>;

  async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>>;

  /// Applies `update` to the user's profile, creating it if needed.
  async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<Profile>;

  /// Newest first.
  async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>>;

  /// Newest first.
  async fn list_reservations_for_user(&self, user_id: Uuid) -> Result<Vec<Reservation>>;

  /// Loads `menu` unless the menu already has items. Returns whether it did.
  async fn seed_menu_if_empty(&self, menu: &SampleMenu) -> Result<bool>;
}
