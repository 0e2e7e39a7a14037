// bistro/app/src/web/routes.rs

use crate::errors::AppError;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde_json::json;

use super::handlers::{account_handlers, cart_handlers, menu_handlers, order_handlers, reservation_handlers};

async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok", "store": app_state.store.backend_tag() }))
}

/// Malformed bodies, queries and paths answer with the same JSON error shape
/// as every other failure.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()))
    .app_data(web::PathConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()));
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  extractor_configs(cfg);
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/menu")
          .route("", web::get().to(menu_handlers::get_menu_handler))
          .route("/categories", web::get().to(menu_handlers::list_categories_handler))
          .route("/items", web::get().to(menu_handlers::list_items_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::view_cart_handler))
          .route("", web::delete().to(cart_handlers::clear_cart_handler))
          .route("/items", web::post().to(cart_handlers::add_item_handler))
          .route("/items/{menu_item_id}", web::patch().to(cart_handlers::update_quantity_handler))
          .route("/items/{menu_item_id}", web::delete().to(cart_handlers::remove_item_handler)),
      )
      .service(
        web::scope("/orders")
          .route("", web::post().to(order_handlers::submit_order_handler))
          .route("/form", web::get().to(order_handlers::get_order_form_handler))
          .route("/form", web::put().to(order_handlers::save_order_form_handler)),
      )
      .service(
        web::scope("/reservations")
          .route("", web::post().to(reservation_handlers::submit_reservation_handler))
          .route("/options", web::get().to(reservation_handlers::reservation_options_handler))
          .route("/form", web::get().to(reservation_handlers::get_reservation_form_handler))
          .route("/form", web::put().to(reservation_handlers::save_reservation_form_handler)),
      )
      .service(
        web::scope("/account")
          .route("", web::get().to(account_handlers::account_overview_handler))
          .route("/profile", web::get().to(account_handlers::get_profile_handler))
          .route("/profile", web::put().to(account_handlers::update_profile_handler))
          .route("/orders", web::get().to(account_handlers::list_orders_handler))
          .route("/reservations", web::get().to(account_handlers::list_reservations_handler)),
      ),
  );
}
