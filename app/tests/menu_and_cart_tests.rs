// tests/menu_and_cart_tests.rs
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use bistro_core::MenuItem;
use common::*;
use serde_json::{json, Value};
use uuid::Uuid;

#[actix_web::test]
async fn health_reports_the_store_in_use() {
  let bistro = TestBistro::new();
  let app = init_app!(bistro);

  let req = test::TestRequest::get().uri("/api/v1/health").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body, json!({ "status": "ok", "store": "memory" }));
}

#[actix_web::test]
async fn menu_is_served_in_display_order() {
  let bistro = TestBistro::new();
  let app = init_app!(bistro);

  let req = test::TestRequest::get().uri("/api/v1/menu").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  let categories: Vec<&str> = body["categories"]
    .as_array()
    .unwrap()
    .iter()
    .map(|c| c["name"].as_str().unwrap())
    .collect();
  assert_eq!(categories, vec!["Coffee", "Tea", "Pastries", "Meals"]);
  assert_eq!(body["items"].as_array().unwrap().len(), 6);
  assert_eq!(body["items"][0]["name"], "Artisan Espresso");
}

#[actix_web::test]
async fn items_can_be_filtered_by_category() {
  let bistro = TestBistro::new();
  let app = init_app!(bistro);
  let pastries = bistro.menu.category_named("Pastries").unwrap().id;

  let req = test::TestRequest::get()
    .uri(&format!("/api/v1/menu/items?category_id={}", pastries))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  let names: Vec<&str> = body["items"].as_array().unwrap().iter().map(|i| i["name"].as_str().unwrap()).collect();
  assert_eq!(names, vec!["Fresh Croissants", "Chocolate Muffin"]);
}

#[actix_web::test]
async fn espresso_twice_and_a_croissant_cost_twelve_fifty() {
  let bistro = TestBistro::new();
  let app = init_app!(bistro);

  for name in ["Artisan Espresso", "Artisan Espresso", "Fresh Croissants"] {
    let req = test::TestRequest::post()
      .uri("/api/v1/cart/items")
      .insert_header(bistro.session_header())
      .set_json(json!({ "menu_item_id": bistro.item_id(name) }))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], format!("{} added to cart", name));
  }

  let req = test::TestRequest::get()
    .uri("/api/v1/cart")
    .insert_header(bistro.session_header())
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["total"], "12.50");
  assert_eq!(body["item_count"], 3);
  assert_eq!(body["lines"].as_array().unwrap().len(), 2);
  assert_eq!(body["lines"][0]["quantity"], 2);
}

#[actix_web::test]
async fn quantity_updates_and_removal_follow_the_cart_rules() {
  let bistro = TestBistro::new();
  let app = init_app!(bistro);
  let latte = bistro.item_id("Honey Lavender Latte");
  let croissant = bistro.item_id("Fresh Croissants");

  for id in [latte, croissant] {
    let req = test::TestRequest::post()
      .uri("/api/v1/cart/items")
      .insert_header(bistro.session_header())
      .set_json(json!({ "menu_item_id": id }))
      .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());
  }

  let req = test::TestRequest::patch()
    .uri(&format!("/api/v1/cart/items/{}", latte))
    .insert_header(bistro.session_header())
    .set_json(json!({ "delta": 2 }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["lines"][0]["quantity"], 3);

  let req = test::TestRequest::patch()
    .uri(&format!("/api/v1/cart/items/{}", latte))
    .insert_header(bistro.session_header())
    .set_json(json!({ "delta": -3 }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["lines"].as_array().unwrap().len(), 1);
  assert_eq!(body["total"], "3.50");

  let req = test::TestRequest::delete()
    .uri(&format!("/api/v1/cart/items/{}", croissant))
    .insert_header(bistro.session_header())
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["lines"], json!([]));
  assert_eq!(body["total"], "0");
}

#[actix_web::test]
async fn carts_belong_to_their_session() {
  let bistro = TestBistro::new();
  let app = init_app!(bistro);

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/items")
    .insert_header(bistro.session_header())
    .set_json(json!({ "menu_item_id": bistro.item_id("Avocado Toast") }))
    .to_request();
  assert!(test::call_service(&app, req).await.status().is_success());

  let req = test::TestRequest::get()
    .uri("/api/v1/cart")
    .insert_header(("X-Session-ID", uuid::Uuid::new_v4().to_string()))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["item_count"], 0);

  let req = test::TestRequest::get().uri("/api/v1/cart").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_and_unavailable_items_cannot_be_added() {
  let bistro = TestBistro::new();
  let app = init_app!(bistro);

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/items")
    .insert_header(bistro.session_header())
    .set_json(json!({ "menu_item_id": uuid::Uuid::new_v4() }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

  let mut sold_out: MenuItem = bistro.menu.item_named("Chocolate Muffin").unwrap().clone();
  sold_out.is_available = Some(false);
  bistro.store.put_menu_item(sold_out.clone());

  let req = test::TestRequest::post()
    .uri("/api/v1/cart/items")
    .insert_header(bistro.session_header())
    .set_json(json!({ "menu_item_id": sold_out.id }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "Chocolate Muffin is currently unavailable");
}

#[actix_web::test]
async fn reading_an_unknown_session_does_not_store_it() {
  let bistro = TestBistro::new();
  let app = init_app!(bistro);

  for uri in ["/api/v1/cart", "/api/v1/orders/form", "/api/v1/reservations/form"] {
    let req = test::TestRequest::get()
      .uri(uri)
      .insert_header(("X-Session-ID", Uuid::new_v4().to_string()))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK, "{}", uri);
  }
  assert!(bistro.state.sessions.is_empty());
}
