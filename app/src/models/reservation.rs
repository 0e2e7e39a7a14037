// bistro/app/src/models/reservation.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
  Pending,
  Confirmed,
  Cancelled,
}

impl ReservationStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      ReservationStatus::Pending => "pending",
      ReservationStatus::Confirmed => "confirmed",
      ReservationStatus::Cancelled => "cancelled",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Reservation {
  pub id: Uuid,
  pub user_id: Option<Uuid>,
  pub customer_name: String,
  pub customer_email: String,
  pub customer_phone: Option<String>,
  pub reservation_date: NaiveDate,
  pub reservation_time: NaiveTime,
  pub party_size: i32,
  pub special_requests: Option<String>,
  pub status: String,
  pub table_number: Option<i32>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
