// bistro/app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use bistro_core::{CartLine, CartStore};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::menu_gateway;
use crate::state::AppState;
use crate::web::extractors::SessionId;

#[derive(Debug, Serialize)]
pub struct CartView {
  pub lines: Vec<CartLine>,
  pub item_count: u64,
  pub total: Decimal,
}

impl From<&CartStore> for CartView {
  fn from(cart: &CartStore) -> Self {
    Self {
      lines: cart.lines().to_vec(),
      item_count: cart.item_count(),
      total: cart.total(),
    }
  }
}

#[derive(Deserialize, Debug)]
pub struct AddItemPayload {
  pub menu_item_id: Uuid,
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityPayload {
  pub delta: i64,
}

#[instrument(name = "handler::view_cart", skip(app_state), fields(session_id = %session.0))]
pub async fn view_cart_handler(app_state: web::Data<AppState>, session: SessionId) -> Result<HttpResponse, AppError> {
  let view = app_state.sessions.read_session(session.0, |s| CartView::from(&s.cart));
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, payload),
  fields(session_id = %session.0, menu_item_id = %payload.menu_item_id)
)]
pub async fn add_item_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  payload: web::Json<AddItemPayload>,
) -> Result<HttpResponse, AppError> {
  let item = menu_gateway::get_orderable_item(app_state.store.as_ref(), payload.menu_item_id).await?;
  let message = format!("{} added to cart", item.name);

  let view = app_state.sessions.with_session(session.0, |s| {
    s.cart.add_item(item);
    CartView::from(&s.cart)
  });
  info!(item_count = view.item_count, "Item added to cart.");
  Ok(HttpResponse::Ok().json(json!({ "message": message, "cart": view })))
}

#[instrument(name = "handler::update_cart_quantity", skip(app_state, path, payload), fields(session_id = %session.0))]
pub async fn update_quantity_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  path: web::Path<Uuid>,
  payload: web::Json<UpdateQuantityPayload>,
) -> Result<HttpResponse, AppError> {
  let menu_item_id = path.into_inner();
  let view = app_state.sessions.with_session(session.0, |s| {
    s.cart.update_quantity(menu_item_id, payload.delta);
    CartView::from(&s.cart)
  });
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::remove_from_cart", skip(app_state, path), fields(session_id = %session.0))]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let menu_item_id = path.into_inner();
  let view = app_state.sessions.with_session(session.0, |s| {
    s.cart.remove_item(menu_item_id);
    CartView::from(&s.cart)
  });
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::clear_cart", skip(app_state), fields(session_id = %session.0))]
pub async fn clear_cart_handler(app_state: web::Data<AppState>, session: SessionId) -> Result<HttpResponse, AppError> {
  let view = app_state.sessions.with_session(session.0, |s| {
    s.cart.clear();
    CartView::from(&s.cart)
  });
  Ok(HttpResponse::Ok().json(view))
}
