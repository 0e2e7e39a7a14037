// bistro/app/src/models/order.rs

use super::OrderItem;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of an order. Assigned by the kitchen side; this service only
/// ever writes `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Preparing,
  Ready,
  Completed,
  Cancelled,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Confirmed => "confirmed",
      OrderStatus::Preparing => "preparing",
      OrderStatus::Ready => "ready",
      OrderStatus::Completed => "completed",
      OrderStatus::Cancelled => "cancelled",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Order {
  pub id: Uuid,
  pub user_id: Option<Uuid>,
  pub customer_name: String,
  pub customer_email: String,
  pub customer_phone: Option<String>,
  pub order_type: String,
  pub status: String,
  pub payment_status: Option<String>,
  pub special_instructions: Option<String>,
  pub total_amount: Decimal,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// An order together with the items written in the same transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedOrder {
  pub order: Order,
  pub items: Vec<OrderItem>,
}
