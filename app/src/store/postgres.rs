// bistro/app/src/store/postgres.rs

use super::{RestaurantStore, SampleMenu};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::{Order, OrderItem, OrderStatus, PlacedOrder, Profile, ProfileUpdate, Reservation, ReservationStatus};
use async_trait::async_trait;
use bistro_core::{MenuCategory, MenuItem, OrderDraft, ReservationDraft};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

const CATEGORY_COLUMNS: &str = "id, name, description, display_order, is_active, created_at";
const ITEM_COLUMNS: &str =
  "id, category_id, name, description, price, display_order, image_url, is_available, is_featured, allergens";
const ORDER_COLUMNS: &str = "id, user_id, customer_name, customer_email, customer_phone, order_type, status, \
  payment_status, special_instructions, total_amount, created_at, updated_at";
const ORDER_ITEM_COLUMNS: &str = "id, order_id, menu_item_id, quantity, unit_price, created_at";
const RESERVATION_COLUMNS: &str = "id, user_id, customer_name, customer_email, customer_phone, reservation_date, \
  reservation_time, party_size, special_requests, status, table_number, created_at, updated_at";
const PROFILE_COLUMNS: &str = "id, user_id, full_name, phone, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn connect(config: &AppConfig) -> Result<Self> {
    let url = config
      .database_url
      .as_deref()
      .ok_or_else(|| AppError::Config("DATABASE_URL is not set".to_string()))?;
    let pool = PgPoolOptions::new()
      .max_connections(config.database_max_connections)
      .connect(url)
      .await
      .map_err(|e| {
        error!("Failed to connect to the database: {}", e);
        AppError::Database(e)
      })?;
    info!("Successfully connected to the database.");
    Ok(Self::new(pool))
  }

  pub async fn run_migrations(&self) -> Result<()> {
    sqlx::migrate!("./migrations")
      .run(&self.pool)
      .await
      .map_err(|e| AppError::Database(e.into()))?;
    info!("Database migrations applied.");
    Ok(())
  }
}

fn quantity_column(quantity: u32) -> Result<i32> {
  i32::try_from(quantity).map_err(|_| AppError::Validation(format!("Quantity {} is too large", quantity)))
}

#[async_trait]
impl RestaurantStore for PgStore {
  fn backend_tag(&self) -> &'static str {
    "postgres"
  }

  #[instrument(name = "PgStore::list_menu_categories", skip(self))]
  async fn list_menu_categories(&self) -> Result<Vec<MenuCategory>> {
    let categories = sqlx::query_as(&format!(
      "SELECT {CATEGORY_COLUMNS} FROM menu_categories ORDER BY display_order ASC NULLS LAST, name ASC"
    ))
    .fetch_all(&self.pool)
    .await?;
    Ok(categories)
  }

  #[instrument(name = "PgStore::list_menu_items", skip(self))]
  async fn list_menu_items(&self, category_id: Option<Uuid>) -> Result<Vec<MenuItem>> {
    let items = sqlx::query_as(&format!(
      "SELECT {ITEM_COLUMNS} FROM menu_items \
       WHERE ($1::uuid IS NULL OR category_id = $1) \
       ORDER BY display_order ASC NULLS LAST, name ASC"
    ))
    .bind(category_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(items)
  }

  #[instrument(name = "PgStore::get_menu_item", skip(self))]
  async fn get_menu_item(&self, id: Uuid) -> Result<Option<MenuItem>> {
    let item = sqlx::query_as(&format!("SELECT {ITEM_COLUMNS} FROM menu_items WHERE id = $1"))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(item)
  }

  #[instrument(name = "PgStore::place_order", skip(self, draft), fields(lines = draft.lines.len()))]
  async fn place_order(&self, user_id: Option<Uuid>, draft: &OrderDraft) -> Result<PlacedOrder> {
    let mut tx = self.pool.begin().await?;

    let order: Order = sqlx::query_as(&format!(
      "INSERT INTO orders (user_id, customer_name, customer_email, customer_phone, order_type, status, \
       special_instructions, total_amount) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {ORDER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(&draft.customer_name)
    .bind(&draft.customer_email)
    .bind(&draft.customer_phone)
    .bind(draft.order_type.as_str())
    .bind(OrderStatus::Pending.as_str())
    .bind(&draft.special_instructions)
    .bind(draft.total_amount)
    .fetch_one(&mut *tx)
    .await?;

    let mut items = Vec::with_capacity(draft.lines.len());
    for line in &draft.lines {
      let item: OrderItem = sqlx::query_as(&format!(
        "INSERT INTO order_items (order_id, menu_item_id, quantity, unit_price) \
         VALUES ($1, $2, $3, $4) RETURNING {ORDER_ITEM_COLUMNS}"
      ))
      .bind(order.id)
      .bind(line.menu_item_id)
      .bind(quantity_column(line.quantity)?)
      .bind(line.unit_price)
      .fetch_one(&mut *tx)
      .await?;
      items.push(item);
    }

    tx.commit().await?;
    info!(order_id = %order.id, items = items.len(), "Order committed.");
    Ok(PlacedOrder { order, items })
  }

  #[instrument(name = "PgStore::create_reservation", skip(self, draft), fields(date = %draft.reservation_date))]
  async fn create_reservation(&self, user_id: Option<Uuid>, draft: &ReservationDraft) -> Result<Reservation> {
    let reservation = sqlx::query_as(&format!(
      "INSERT INTO reservations (user_id, customer_name, customer_email, customer_phone, reservation_date, \
       reservation_time, party_size, special_requests, status) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {RESERVATION_COLUMNS}"
    ))
    .bind(user_id)
    .bind(&draft.customer_name)
    .bind(&draft.customer_email)
    .bind(&draft.customer_phone)
    .bind(draft.reservation_date)
    .bind(draft.reservation_time.time())
    .bind(i32::from(draft.party_size.get()))
    .bind(&draft.special_requests)
    .bind(ReservationStatus::Pending.as_str())
    .fetch_one(&self.pool)
    .await?;
    Ok(reservation)
  }

  #[instrument(name = "PgStore::get_profile", skip(self))]
  async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
    let profile = sqlx::query_as(&format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"))
      .bind(user_id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(profile)
  }

  #[instrument(name = "PgStore::update_profile", skip(self, update))]
  async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<Profile> {
    let mut tx = self.pool.begin().await?;
    let current: Option<Profile> =
      sqlx::query_as(&format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1 FOR UPDATE"))
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
    let (full_name, phone) = update.merge(current.as_ref());

    let profile = sqlx::query_as(&format!(
      "INSERT INTO profiles (user_id, full_name, phone) VALUES ($1, $2, $3) \
       ON CONFLICT (user_id) DO UPDATE SET full_name = EXCLUDED.full_name, phone = EXCLUDED.phone, updated_at = now() \
       RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(user_id)
    .bind(full_name)
    .bind(phone)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(profile)
  }

  #[instrument(name = "PgStore::list_orders_for_user", skip(self))]
  async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
    let orders = sqlx::query_as(&format!(
      "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(orders)
  }

  #[instrument(name = "PgStore::list_reservations_for_user", skip(self))]
  async fn list_reservations_for_user(&self, user_id: Uuid) -> Result<Vec<Reservation>> {
    let reservations = sqlx::query_as(&format!(
      "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(reservations)
  }

  #[instrument(name = "PgStore::seed_menu_if_empty", skip_all)]
  async fn seed_menu_if_empty(&self, menu: &SampleMenu) -> Result<bool> {
    let mut tx = self.pool.begin().await?;
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items")
      .fetch_one(&mut *tx)
      .await?;
    if existing > 0 {
      tx.commit().await?;
      return Ok(false);
    }

    for category in &menu.categories {
      sqlx::query(
        "INSERT INTO menu_categories (id, name, description, display_order, is_active, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
      )
      .bind(category.id)
      .bind(&category.name)
      .bind(&category.description)
      .bind(category.display_order)
      .bind(category.is_active)
      .bind(category.created_at)
      .execute(&mut *tx)
      .await?;
    }
    for item in &menu.items {
      sqlx::query(
        "INSERT INTO menu_items (id, category_id, name, description, price, display_order, image_url, \
         is_available, is_featured, allergens) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
      )
      .bind(item.id)
      .bind(item.category_id)
      .bind(&item.name)
      .bind(&item.description)
      .bind(item.price)
      .bind(item.display_order)
      .bind(&item.image_url)
      .bind(item.is_available)
      .bind(item.is_featured)
      .bind(&item.allergens)
      .execute(&mut *tx)
      .await?;
    }
    tx.commit().await?;
    info!(
      categories = menu.categories.len(),
      items = menu.items.len(),
      "Seeded the sample menu."
    );
    Ok(true)
  }
}
