// bistro/app/src/web/handlers/menu_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::menu_gateway;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ListItemsQuery {
  pub category_id: Option<Uuid>,
}

#[instrument(name = "handler::get_menu", skip(app_state))]
pub async fn get_menu_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let menu = menu_gateway::load_menu(app_state.store.as_ref()).await?;
  Ok(HttpResponse::Ok().json(menu))
}

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = menu_gateway::list_menu_categories(app_state.store.as_ref()).await?;
  info!("Fetched {} categories.", categories.len());
  Ok(HttpResponse::Ok().json(json!({ "categories": categories })))
}

#[instrument(name = "handler::list_items", skip(app_state))]
pub async fn list_items_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListItemsQuery>,
) -> Result<HttpResponse, AppError> {
  let items = menu_gateway::list_menu_items(app_state.store.as_ref(), query.category_id).await?;
  info!("Fetched {} menu items.", items.len());
  Ok(HttpResponse::Ok().json(json!({ "items": items })))
}
