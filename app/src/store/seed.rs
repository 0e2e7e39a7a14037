// bistro/app/src/store/seed.rs

//! The house menu loaded into an empty store.

use bistro_core::{MenuCategory, MenuItem};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SampleMenu {
  pub categories: Vec<MenuCategory>,
  pub items: Vec<MenuItem>,
}

struct SeedItem {
  category: &'static str,
  name: &'static str,
  description: &'static str,
  price_cents: i64,
  featured: bool,
  allergens: &'static [&'static str],
}

const CATEGORIES: [(&str, &str); 4] = [
  ("Coffee", "Espresso drinks from single-origin beans"),
  ("Tea", "Loose-leaf teas, steeped to order"),
  ("Pastries", "Baked fresh every morning"),
  ("Meals", "Breakfast and lunch plates"),
];

const ITEMS: [SeedItem; 6] = [
  SeedItem {
    category: "Coffee",
    name: "Artisan Espresso",
    description: "Rich, bold espresso with notes of dark chocolate and caramel",
    price_cents: 450,
    featured: true,
    allergens: &[],
  },
  SeedItem {
    category: "Coffee",
    name: "Honey Lavender Latte",
    description: "Smooth espresso with steamed milk, local honey, and dried lavender",
    price_cents: 575,
    featured: true,
    allergens: &["milk"],
  },
  SeedItem {
    category: "Tea",
    name: "Earl Grey Supreme",
    description: "Premium Earl Grey blend with bergamot and cornflower petals",
    price_cents: 325,
    featured: false,
    allergens: &[],
  },
  SeedItem {
    category: "Pastries",
    name: "Fresh Croissants",
    description: "Buttery, flaky croissants baked fresh daily",
    price_cents: 350,
    featured: false,
    allergens: &["gluten", "milk", "eggs"],
  },
  SeedItem {
    category: "Meals",
    name: "Avocado Toast",
    description: "Sourdough toast topped with smashed avocado, cherry tomatoes, and hemp seeds",
    price_cents: 895,
    featured: true,
    allergens: &["gluten"],
  },
  SeedItem {
    category: "Pastries",
    name: "Chocolate Muffin",
    description: "Double chocolate muffin with Belgian chocolate chips",
    price_cents: 425,
    featured: false,
    allergens: &["gluten", "milk", "eggs", "soy"],
  },
];

impl SampleMenu {
  pub fn new() -> Self {
    let now = Utc::now();
    let categories: Vec<MenuCategory> = CATEGORIES
      .iter()
      .zip(1..)
      .map(|(&(name, description), display_order)| MenuCategory {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: Some(description.to_string()),
        display_order: Some(display_order),
        is_active: Some(true),
        created_at: now,
      })
      .collect();

    let items = ITEMS
      .iter()
      .zip(1..)
      .filter_map(|(seed, display_order)| {
        let category = categories.iter().find(|c| c.name == seed.category)?;
        Some(MenuItem {
          id: Uuid::new_v4(),
          category_id: category.id,
          name: seed.name.to_string(),
          description: Some(seed.description.to_string()),
          price: Decimal::new(seed.price_cents, 2),
          display_order: Some(display_order),
          image_url: None,
          is_available: Some(true),
          is_featured: Some(seed.featured),
          allergens: Some(seed.allergens.iter().map(|a| a.to_string()).collect()),
        })
      })
      .collect();

    Self { categories, items }
  }

  pub fn item_named(&self, name: &str) -> Option<&MenuItem> {
    self.items.iter().find(|item| item.name == name)
  }

  pub fn category_named(&self, name: &str) -> Option<&MenuCategory> {
    self.categories.iter().find(|category| category.name == name)
  }
}

impl Default for SampleMenu {
  fn default() -> Self {
    Self::new()
  }
}
