// bistro/core/src/cart.rs

//! The Cart Store: menu items picked for the order in progress.

use crate::forms::OrderDraftLine;
use crate::menu::MenuItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One menu item and how many of it are in the cart. `quantity >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
  pub item: MenuItem,
  pub quantity: u32,
}

impl CartLine {
  pub fn line_total(&self) -> Decimal {
    self.item.price * Decimal::from(self.quantity)
  }
}

/// Lines keep the order in which items were first added; at most one line per
/// menu item id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartStore {
  lines: Vec<CartLine>,
}

impl CartStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds one of `item`, merging into its existing line.
  pub fn add_item(&mut self, item: MenuItem) {
    match self.lines.iter_mut().find(|line| line.item.id == item.id) {
      Some(line) => line.quantity += 1,
      None => self.lines.push(CartLine { item, quantity: 1 }),
    }
  }

  /// Shifts a line's quantity by `delta`, saturating at the bounds; a result
  /// of zero or less drops the line. Unknown ids are ignored.
  pub fn update_quantity(&mut self, id: Uuid, delta: i64) {
    let Some(idx) = self.lines.iter().position(|line| line.item.id == id) else {
      return;
    };
    let next = i64::from(self.lines[idx].quantity).saturating_add(delta);
    if next <= 0 {
      self.lines.remove(idx);
    } else {
      self.lines[idx].quantity = u32::try_from(next).unwrap_or(u32::MAX);
    }
  }

  /// Takes out what an order was priced from, leaving anything added since.
  pub fn remove_ordered(&mut self, ordered: &[OrderDraftLine]) {
    for line in ordered {
      self.update_quantity(line.menu_item_id, -i64::from(line.quantity));
    }
  }

  pub fn remove_item(&mut self, id: Uuid) {
    self.lines.retain(|line| line.item.id != id);
  }

  pub fn total(&self) -> Decimal {
    self.lines.iter().map(CartLine::line_total).sum()
  }

  pub fn clear(&mut self) {
    self.lines.clear();
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  /// Number of distinct lines.
  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Sum of all quantities.
  pub fn item_count(&self) -> u64 {
    self.lines.iter().map(|line| u64::from(line.quantity)).sum()
  }

  pub fn quantity_of(&self, id: Uuid) -> Option<u32> {
    self.lines.iter().find(|line| line.item.id == id).map(|line| line.quantity)
  }
}
