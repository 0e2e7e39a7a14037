// bistro/app/src/store/memory.rs

//! Process-local store. Used when no database is configured and by the tests,
//! which can make individual writes fail and count what was written.

use super::{RestaurantStore, SampleMenu};
use crate::errors::{AppError, Result};
use crate::models::{Order, OrderItem, OrderStatus, PlacedOrder, Profile, ProfileUpdate, Reservation, ReservationStatus};
use async_trait::async_trait;
use bistro_core::menu::{sort_categories, sort_items};
use bistro_core::{MenuCategory, MenuItem, OrderDraft, ReservationDraft};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{event, Level};
use uuid::Uuid;

/// A write that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailurePoint {
  OrderInsert,
  OrderItemInsert,
  ReservationInsert,
  ProfileWrite,
  Reads,
}

#[derive(Default)]
struct Tables {
  categories: Vec<MenuCategory>,
  items: Vec<MenuItem>,
  orders: Vec<Order>,
  order_items: Vec<OrderItem>,
  reservations: Vec<Reservation>,
  profiles: Vec<Profile>,
}

#[derive(Default)]
pub struct MemoryStore {
  tables: RwLock<Tables>,
  failures: RwLock<HashSet<FailurePoint>>,
  calls: AtomicUsize,
  orders_inserted: AtomicUsize,
  order_items_inserted: AtomicUsize,
  reservations_inserted: AtomicUsize,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_menu(menu: &SampleMenu) -> Self {
    let store = Self::new();
    {
      let mut tables = store.tables.write();
      tables.categories = menu.categories.clone();
      tables.items = menu.items.clone();
    }
    store
  }

  pub fn fail_on(&self, point: FailurePoint) {
    self.failures.write().insert(point);
  }

  pub fn clear_failures(&self) {
    self.failures.write().clear();
  }

  /// Adds or replaces a menu item.
  pub fn put_menu_item(&self, item: MenuItem) {
    let mut tables = self.tables.write();
    tables.items.retain(|existing| existing.id != item.id);
    tables.items.push(item);
  }

  /// Every trait call made so far, reads included.
  pub fn backend_calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn orders_inserted(&self) -> usize {
    self.orders_inserted.load(Ordering::SeqCst)
  }

  pub fn order_items_inserted(&self) -> usize {
    self.order_items_inserted.load(Ordering::SeqCst)
  }

  pub fn reservations_inserted(&self) -> usize {
    self.reservations_inserted.load(Ordering::SeqCst)
  }

  pub fn order_items_for(&self, order_id: Uuid) -> Vec<OrderItem> {
    self
      .tables
      .read()
      .order_items
      .iter()
      .filter(|item| item.order_id == order_id)
      .cloned()
      .collect()
  }

  pub fn all_orders(&self) -> Vec<Order> {
    self.tables.read().orders.clone()
  }

  fn enter(&self, point: Option<FailurePoint>) -> Result<()> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    match point {
      Some(point) if self.failures.read().contains(&point) => {
        event!(Level::WARN, ?point, "Injected store failure.");
        Err(AppError::Backend(format!("injected failure at {:?}", point)))
      }
      _ => Ok(()),
    }
  }

  fn check(&self, point: FailurePoint) -> Result<()> {
    if self.failures.read().contains(&point) {
      event!(Level::WARN, ?point, "Injected store failure.");
      return Err(AppError::Backend(format!("injected failure at {:?}", point)));
    }
    Ok(())
  }
}

/// Newest first; rows created in the same instant keep reverse insertion order.
fn newest_first<T>(rows: impl DoubleEndedIterator<Item = T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
  let mut rows: Vec<T> = rows.rev().collect();
  rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
  rows
}

#[async_trait]
impl RestaurantStore for MemoryStore {
  fn backend_tag(&self) -> &'static str {
    "memory"
  }

  async fn list_menu_categories(&self) -> Result<Vec<MenuCategory>> {
    self.enter(Some(FailurePoint::Reads))?;
    let mut categories = self.tables.read().categories.clone();
    sort_categories(&mut categories);
    Ok(categories)
  }

  async fn list_menu_items(&self, category_id: Option<Uuid>) -> Result<Vec<MenuItem>> {
    self.enter(Some(FailurePoint::Reads))?;
    let mut items: Vec<MenuItem> = self
      .tables
      .read()
      .items
      .iter()
      .filter(|item| category_id.map_or(true, |id| item.category_id == id))
      .cloned()
      .collect();
    sort_items(&mut items);
    Ok(items)
  }

  async fn get_menu_item(&self, id: Uuid) -> Result<Option<MenuItem>> {
    self.enter(Some(FailurePoint::Reads))?;
    Ok(self.tables.read().items.iter().find(|item| item.id == id).cloned())
  }

  async fn place_order(&self, user_id: Option<Uuid>, draft: &OrderDraft) -> Result<PlacedOrder> {
    self.enter(Some(FailurePoint::OrderInsert))?;
    let now = Utc::now();
    let order = Order {
      id: Uuid::new_v4(),
      user_id,
      customer_name: draft.customer_name.clone(),
      customer_email: draft.customer_email.clone(),
      customer_phone: draft.customer_phone.clone(),
      order_type: draft.order_type.as_str().to_string(),
      status: OrderStatus::Pending.as_str().to_string(),
      payment_status: None,
      special_instructions: draft.special_instructions.clone(),
      total_amount: draft.total_amount,
      created_at: now,
      updated_at: now,
    };

    // Staged first; nothing is visible unless every item can be written.
    let mut items = Vec::with_capacity(draft.lines.len());
    for line in &draft.lines {
      self.check(FailurePoint::OrderItemInsert)?;
      let quantity = i32::try_from(line.quantity)
        .map_err(|_| AppError::Validation(format!("Quantity {} is too large", line.quantity)))?;
      items.push(OrderItem {
        id: Uuid::new_v4(),
        order_id: order.id,
        menu_item_id: line.menu_item_id,
        quantity,
        unit_price: line.unit_price,
        created_at: now,
      });
    }

    {
      let mut tables = self.tables.write();
      tables.orders.push(order.clone());
      tables.order_items.extend(items.iter().cloned());
    }
    self.orders_inserted.fetch_add(1, Ordering::SeqCst);
    self.order_items_inserted.fetch_add(items.len(), Ordering::SeqCst);
    event!(Level::DEBUG, order_id = %order.id, items = items.len(), "Order stored in memory.");
    Ok(PlacedOrder { order, items })
  }

  async fn create_reservation(&self, user_id: Option<Uuid>, draft: &ReservationDraft) -> Result<Reservation> {
    self.enter(Some(FailurePoint::ReservationInsert))?;
    let now = Utc::now();
    let reservation = Reservation {
      id: Uuid::new_v4(),
      user_id,
      customer_name: draft.customer_name.clone(),
      customer_email: draft.customer_email.clone(),
      customer_phone: draft.customer_phone.clone(),
      reservation_date: draft.reservation_date,
      reservation_time: draft.reservation_time.time(),
      party_size: i32::from(draft.party_size.get()),
      special_requests: draft.special_requests.clone(),
      status: ReservationStatus::Pending.as_str().to_string(),
      table_number: None,
      created_at: now,
      updated_at: now,
    };
    self.tables.write().reservations.push(reservation.clone());
    self.reservations_inserted.fetch_add(1, Ordering::SeqCst);
    Ok(reservation)
  }

  async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
    self.enter(Some(FailurePoint::Reads))?;
    Ok(self.tables.read().profiles.iter().find(|p| p.user_id == user_id).cloned())
  }

  async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<Profile> {
    self.enter(Some(FailurePoint::ProfileWrite))?;
    let now = Utc::now();
    let mut tables = self.tables.write();
    let existing = tables.profiles.iter().position(|p| p.user_id == user_id);
    let (full_name, phone) = update.merge(existing.map(|idx| &tables.profiles[idx]));
    let profile = match existing {
      Some(idx) => {
        let profile = &mut tables.profiles[idx];
        profile.full_name = full_name;
        profile.phone = phone;
        profile.updated_at = now;
        profile.clone()
      }
      None => {
        let profile = Profile {
          id: Uuid::new_v4(),
          user_id,
          full_name,
          phone,
          created_at: now,
          updated_at: now,
        };
        tables.profiles.push(profile.clone());
        profile
      }
    };
    Ok(profile)
  }

  async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
    self.enter(Some(FailurePoint::Reads))?;
    let tables = self.tables.read();
    let mine = tables.orders.iter().filter(|o| o.user_id == Some(user_id)).cloned();
    Ok(newest_first(mine, |o| o.created_at))
  }

  async fn list_reservations_for_user(&self, user_id: Uuid) -> Result<Vec<Reservation>> {
    self.enter(Some(FailurePoint::Reads))?;
    let tables = self.tables.read();
    let mine = tables.reservations.iter().filter(|r| r.user_id == Some(user_id)).cloned();
    Ok(newest_first(mine, |r| r.created_at))
  }

  async fn seed_menu_if_empty(&self, menu: &SampleMenu) -> Result<bool> {
    self.enter(None)?;
    let mut tables = self.tables.write();
    if !tables.items.is_empty() {
      return Ok(false);
    }
    tables.categories = menu.categories.clone();
    tables.items = menu.items.clone();
    Ok(true)
  }
}
