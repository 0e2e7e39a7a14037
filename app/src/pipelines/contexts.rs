// bistro/app/src/pipelines/contexts.rs

//! State threaded through the submission flows. Handlers receive these
//! wrapped in `bistro_core::FlowState`.

use crate::models::{PlacedOrder, Reservation};
use crate::state::AppState;
use bistro_core::{OrderDraft, ReservationDraft};
use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderSubmissionCtxData {
  pub app_state: AppState,
  pub session_id: Uuid,
  /// Signed-in customer, if any; links the order to their history.
  pub user_id: Option<Uuid>,
  pub draft: Option<OrderDraft>,
  pub placed: Option<PlacedOrder>,
}

impl OrderSubmissionCtxData {
  pub fn new(app_state: AppState, session_id: Uuid, user_id: Option<Uuid>) -> Self {
    Self {
      app_state,
      session_id,
      user_id,
      draft: None,
      placed: None,
    }
  }
}

#[derive(Clone)]
pub struct ReservationSubmissionCtxData {
  pub app_state: AppState,
  pub session_id: Uuid,
  pub user_id: Option<Uuid>,
  /// Earliest bookable date.
  pub today: NaiveDate,
  pub draft: Option<ReservationDraft>,
  pub reservation: Option<Reservation>,
}

impl ReservationSubmissionCtxData {
  pub fn new(app_state: AppState, session_id: Uuid, user_id: Option<Uuid>, today: NaiveDate) -> Self {
    Self {
      app_state,
      session_id,
      user_id,
      today,
      draft: None,
      reservation: None,
    }
  }
}
