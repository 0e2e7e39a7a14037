// bistro/core/src/menu.rs

//! Menu categories and items as served by the menu gateway.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MenuCategory {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub display_order: Option<i32>,
  pub is_active: Option<bool>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MenuItem {
  pub id: Uuid,
  pub category_id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub price: Decimal,
  pub display_order: Option<i32>,
  pub image_url: Option<String>,
  pub is_available: Option<bool>,
  pub is_featured: Option<bool>,
  pub allergens: Option<Vec<String>>,
}

impl MenuItem {
  /// A missing availability flag means available.
  pub fn is_orderable(&self) -> bool {
    self.is_available.unwrap_or(true)
  }
}

/// Ascending display order, entries without one last, ties broken by name.
pub fn by_display_order(a: (Option<i32>, &str), b: (Option<i32>, &str)) -> Ordering {
  match (a.0, b.0) {
    (Some(x), Some(y)) => x.cmp(&y),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
  .then_with(|| a.1.cmp(b.1))
}

pub fn sort_categories(categories: &mut [MenuCategory]) {
  categories.sort_by(|a, b| by_display_order((a.display_order, &a.name), (b.display_order, &b.name)));
}

pub fn sort_items(items: &mut [MenuItem]) {
  items.sort_by(|a, b| by_display_order((a.display_order, &a.name), (b.display_order, &b.name)));
}

#[cfg(test)]
mod tests {
  use super::*;

  fn category(name: &str, display_order: Option<i32>) -> MenuCategory {
    MenuCategory {
      id: Uuid::new_v4(),
      name: name.to_string(),
      description: None,
      display_order,
      is_active: Some(true),
      created_at: Utc::now(),
    }
  }

  #[test]
  fn categories_sort_by_display_order_then_name_with_missing_last() {
    let mut categories = vec![
      category("Tea", Some(2)),
      category("Specials", None),
      category("Coffee", Some(1)),
      category("Bakery", None),
      category("Meals", Some(2)),
    ];
    sort_categories(&mut categories);
    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Coffee", "Meals", "Tea", "Bakery", "Specials"]);
  }
}
