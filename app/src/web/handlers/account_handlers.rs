// bistro/app/src/web/handlers/account_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::ProfileUpdate;
use crate::services::account_gateway;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::account_overview", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn account_overview_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let overview = account_gateway::account_overview(app_state.store.as_ref(), auth_user.user_id).await?;
  info!(
    orders = overview.orders.len(),
    reservations = overview.reservations.len(),
    "Account overview loaded."
  );
  Ok(HttpResponse::Ok().json(overview))
}

#[instrument(name = "handler::get_profile", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  match account_gateway::get_profile(app_state.store.as_ref(), auth_user.user_id).await? {
    Some(profile) => Ok(HttpResponse::Ok().json(profile)),
    None => {
      warn!("No profile for user {}.", auth_user.user_id);
      Err(AppError::NotFound("Profile not found".to_string()))
    }
  }
}

#[instrument(
  name = "handler::update_profile",
  skip(app_state, auth_user, update),
  fields(user_id = %auth_user.user_id)
)]
pub async fn update_profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  update: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
  let profile = account_gateway::update_profile(app_state.store.as_ref(), auth_user.user_id, &update).await?;
  Ok(HttpResponse::Ok().json(json!({
    "message": "Profile updated successfully",
    "profile": profile,
  })))
}

#[instrument(name = "handler::list_orders", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let orders = account_gateway::list_orders_for_user(app_state.store.as_ref(), auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

#[instrument(name = "handler::list_reservations", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_reservations_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let reservations = account_gateway::list_reservations_for_user(app_state.store.as_ref(), auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "reservations": reservations })))
}
