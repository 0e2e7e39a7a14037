// bistro/app/src/web/handlers/reservation_handlers.rs

use actix_web::{web, HttpResponse};
use bistro_core::{FlowOutcome, FlowState, PartySize, ReservationForm, TimeSlot};
use chrono::Local;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::pipelines::contexts::ReservationSubmissionCtxData;
use crate::state::AppState;
use crate::web::extractors::{AuthenticatedUser, SessionId};

/// The choices the booking form offers.
pub async fn reservation_options_handler() -> HttpResponse {
  let time_slots: Vec<String> = TimeSlot::all().iter().map(ToString::to_string).collect();
  let party_sizes: Vec<u8> = PartySize::all().map(PartySize::get).collect();
  HttpResponse::Ok().json(json!({
    "time_slots": time_slots,
    "party_sizes": party_sizes,
    "earliest_date": Local::now().date_naive(),
  }))
}

#[instrument(name = "handler::get_reservation_form", skip(app_state), fields(session_id = %session.0))]
pub async fn get_reservation_form_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let form = app_state.sessions.read_session(session.0, |s| s.reservation_form.clone());
  Ok(HttpResponse::Ok().json(form))
}

#[instrument(name = "handler::save_reservation_form", skip(app_state, form), fields(session_id = %session.0))]
pub async fn save_reservation_form_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  form: web::Json<ReservationForm>,
) -> Result<HttpResponse, AppError> {
  let form = form.into_inner();
  app_state.sessions.with_session(session.0, |s| s.reservation_form = form.clone());
  Ok(HttpResponse::Ok().json(form))
}

#[instrument(
  name = "handler::submit_reservation",
  skip(app_state, form, user),
  fields(session_id = %session.0, user_id = ?user.map(|u| u.user_id))
)]
pub async fn submit_reservation_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  user: Option<AuthenticatedUser>,
  form: web::Json<ReservationForm>,
) -> Result<HttpResponse, AppError> {
  app_state.sessions.with_session(session.0, |s| s.reservation_form = form.into_inner());

  let ctx_data = ReservationSubmissionCtxData::new(
    app_state.get_ref().clone(),
    session.0,
    user.map(|u| u.user_id),
    Local::now().date_naive(),
  );
  let flow_state = FlowState::new(ctx_data);

  match app_state.flows.run(flow_state.clone()).await {
    Ok(FlowOutcome::Completed) => {
      let reservation = flow_state.read().reservation.clone().ok_or_else(|| {
        warn!("Reservation flow completed but no reservation was recorded.");
        AppError::Internal("Reservation completed, but its confirmation is unavailable.".to_string())
      })?;
      info!(reservation_id = %reservation.id, "Reservation submission completed.");
      Ok(HttpResponse::Created().json(json!({
        "message": "Reservation request submitted! We'll confirm shortly.",
        "reservation": reservation,
      })))
    }
    Ok(FlowOutcome::Halted) => {
      warn!("Reservation flow was halted by a handler.");
      Err(AppError::FlowHalted)
    }
    Err(app_err) => {
      warn!("Reservation flow failed: {}", app_err);
      Err(app_err)
    }
  }
}
