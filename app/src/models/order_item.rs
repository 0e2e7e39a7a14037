// bistro/app/src/models/order_item.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One ordered menu item. `unit_price` is the menu price when the order was
/// placed, not the current one.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct OrderItem {
  pub id: Uuid,
  pub order_id: Uuid,
  pub menu_item_id: Uuid,
  pub quantity: i32,
  pub unit_price: Decimal,
  pub created_at: DateTime<Utc>,
}
