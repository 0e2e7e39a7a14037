// bistro/core/src/forms/mod.rs

//! Customer-facing forms and the local validation run before any backend call.

pub mod order;
pub mod reservation;

use chrono::NaiveDate;
use thiserror::Error;

pub use order::{validate_order, OrderDraft, OrderDraftLine, OrderForm, OrderType};
pub use reservation::{validate_reservation, PartySize, ReservationDraft, ReservationForm, TimeSlot};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
  #[error("Cart is empty")]
  EmptyCart,

  #[error("Please fill in your contact information")]
  MissingContact,

  #[error("Please fill in all required fields")]
  MissingReservationFields,

  #[error("Reservation date {0} is in the past")]
  DateInPast(NaiveDate),

  #[error("Party size must be between {min} and {max}, got {got}", min = PartySize::MIN, max = PartySize::MAX)]
  PartySizeOutOfRange { got: i64 },

  #[error("'{0}' is not a party size")]
  InvalidPartySize(String),

  #[error("'{0}' is not an offered reservation time")]
  UnknownTimeSlot(String),

  #[error("Unknown order type '{0}'")]
  UnknownOrderType(String),
}

/// Trimmed value, or `None` when nothing but whitespace is left.
pub(crate) fn non_blank(value: &str) -> Option<String> {
  let trimmed = value.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_string())
}
