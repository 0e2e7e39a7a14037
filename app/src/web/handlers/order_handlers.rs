// bistro/app/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use bistro_core::{FlowOutcome, FlowState, OrderForm};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::pipelines::contexts::OrderSubmissionCtxData;
use crate::state::AppState;
use crate::web::extractors::{AuthenticatedUser, SessionId};

#[instrument(name = "handler::get_order_form", skip(app_state), fields(session_id = %session.0))]
pub async fn get_order_form_handler(app_state: web::Data<AppState>, session: SessionId) -> Result<HttpResponse, AppError> {
  let form = app_state.sessions.read_session(session.0, |s| s.order_form.clone());
  Ok(HttpResponse::Ok().json(form))
}

#[instrument(name = "handler::save_order_form", skip(app_state, form), fields(session_id = %session.0))]
pub async fn save_order_form_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  form: web::Json<OrderForm>,
) -> Result<HttpResponse, AppError> {
  let form = form.into_inner();
  app_state.sessions.with_session(session.0, |s| s.order_form = form.clone());
  Ok(HttpResponse::Ok().json(form))
}

/// Saves the submitted form into the session, then runs the order flow over
/// the session's cart.
#[instrument(
  name = "handler::submit_order",
  skip(app_state, form, user),
  fields(session_id = %session.0, user_id = ?user.map(|u| u.user_id))
)]
pub async fn submit_order_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  user: Option<AuthenticatedUser>,
  form: web::Json<OrderForm>,
) -> Result<HttpResponse, AppError> {
  app_state.sessions.with_session(session.0, |s| s.order_form = form.into_inner());

  let ctx_data = OrderSubmissionCtxData::new(app_state.get_ref().clone(), session.0, user.map(|u| u.user_id));
  let flow_state = FlowState::new(ctx_data);

  match app_state.flows.run(flow_state.clone()).await {
    Ok(FlowOutcome::Completed) => {
      let placed = flow_state.read().placed.clone().ok_or_else(|| {
        warn!("Order flow completed but no order was recorded.");
        AppError::Internal("Order completed, but its confirmation is unavailable.".to_string())
      })?;
      info!(order_id = %placed.order.id, total = %placed.order.total_amount, "Order submission completed.");
      Ok(HttpResponse::Created().json(json!({
        "message": "Order placed successfully!",
        "order": placed.order,
        "items": placed.items,
      })))
    }
    Ok(FlowOutcome::Halted) => {
      warn!("Order flow was halted by a handler.");
      Err(AppError::FlowHalted)
    }
    Err(app_err) => {
      warn!("Order flow failed: {}", app_err);
      Err(app_err)
    }
  }
}
