// bistro/core/src/forms/order.rs
use super::{non_blank, FormError};
use crate::cart::CartStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
  #[default]
  Pickup,
  Delivery,
  DineIn,
}

impl OrderType {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderType::Pickup => "pickup",
      OrderType::Delivery => "delivery",
      OrderType::DineIn => "dine_in",
    }
  }
}

impl fmt::Display for OrderType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderType {
  type Err = FormError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pickup" => Ok(OrderType::Pickup),
      "delivery" => Ok(OrderType::Delivery),
      "dine_in" => Ok(OrderType::DineIn),
      other => Err(FormError::UnknownOrderType(other.to_string())),
    }
  }
}

/// The checkout form as the customer fills it in. Every field may be blank
/// while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderForm {
  pub order_type: OrderType,
  pub name: String,
  pub email: String,
  pub phone: String,
  pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraftLine {
  pub menu_item_id: Uuid,
  pub quantity: u32,
  pub unit_price: Decimal,
}

/// A validated order, priced from the cart at validation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
  pub order_type: OrderType,
  pub customer_name: String,
  pub customer_email: String,
  pub customer_phone: Option<String>,
  pub special_instructions: Option<String>,
  pub total_amount: Decimal,
  pub lines: Vec<OrderDraftLine>,
}

/// Checks the cart first, then the required contact fields (name, email).
pub fn validate_order(cart: &CartStore, form: &OrderForm) -> Result<OrderDraft, FormError> {
  if cart.is_empty() {
    return Err(FormError::EmptyCart);
  }
  let (Some(customer_name), Some(customer_email)) = (non_blank(&form.name), non_blank(&form.email)) else {
    return Err(FormError::MissingContact);
  };

  let lines = cart
    .lines()
    .iter()
    .map(|line| OrderDraftLine {
      menu_item_id: line.item.id,
      quantity: line.quantity,
      unit_price: line.item.price,
    })
    .collect();

  Ok(OrderDraft {
    order_type: form.order_type,
    customer_name,
    customer_email,
    customer_phone: non_blank(&form.phone),
    special_instructions: non_blank(&form.instructions),
    total_amount: cart.total(),
    lines,
  })
}
