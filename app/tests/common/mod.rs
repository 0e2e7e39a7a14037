// tests/common/mod.rs
#![allow(dead_code)]

use bistro_app::config::AppConfig;
use bistro_app::state::AppState;
use bistro_app::store::{MemoryStore, RestaurantStore, SampleMenu};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub struct TestBistro {
  pub menu: SampleMenu,
  pub store: Arc<MemoryStore>,
  pub state: AppState,
  pub session_id: Uuid,
}

impl TestBistro {
  pub fn new() -> Self {
    setup_tracing();
    let menu = SampleMenu::new();
    let store = Arc::new(MemoryStore::with_menu(&menu));
    let dyn_store: Arc<dyn RestaurantStore> = store.clone();
    let state = AppState::new(dyn_store, Arc::new(AppConfig::default()));
    Self {
      menu,
      store,
      state,
      session_id: Uuid::new_v4(),
    }
  }

  pub fn item_id(&self, name: &str) -> Uuid {
    self.menu.item_named(name).map(|item| item.id).expect("sample menu item")
  }

  pub fn session_header(&self) -> (&'static str, String) {
    ("X-Session-ID", self.session_id.to_string())
  }
}

pub fn user_header(user_id: Uuid) -> (&'static str, String) {
  ("X-User-ID", user_id.to_string())
}

/// Builds the service over `$bistro.state` with every route configured.
#[macro_export]
macro_rules! init_app {
  ($bistro:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($bistro.state.clone()))
        .configure(bistro_app::web::configure_app_routes),
    )
    .await
  };
}
