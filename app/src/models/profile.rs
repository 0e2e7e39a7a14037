// bistro/app/src/models/profile.rs

use super::{Order, Reservation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Profile {
  pub id: Uuid,
  pub user_id: Uuid,
  pub full_name: Option<String>,
  pub phone: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Profile patch. An absent field is left as is; a blank one is cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
  pub full_name: Option<String>,
  pub phone: Option<String>,
}

impl ProfileUpdate {
  /// The `(full_name, phone)` to store given the current values.
  pub fn merge(&self, current: Option<&Profile>) -> (Option<String>, Option<String>) {
    fn pick(patch: &Option<String>, current: Option<&String>) -> Option<String> {
      match patch {
        Some(value) => Some(value.trim().to_string()).filter(|v| !v.is_empty()),
        None => current.cloned(),
      }
    }
    (
      pick(&self.full_name, current.and_then(|p| p.full_name.as_ref())),
      pick(&self.phone, current.and_then(|p| p.phone.as_ref())),
    )
  }
}

/// Everything the account page shows.
#[derive(Debug, Clone, Serialize)]
pub struct AccountOverview {
  pub profile: Option<Profile>,
  pub orders: Vec<Order>,
  pub reservations: Vec<Reservation>,
}
