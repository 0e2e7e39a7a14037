// tests/common/mod.rs
#![allow(dead_code)]

use bistro_core::{FlowError, FlowState, MenuItem, StepControl};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct TestState {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub halt_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  // FlowError is not PartialEq, keep its Debug form for assertions.
  #[error("flow engine error: {0}")]
  Flow(String),

  #[error("test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(err: FlowError) -> Self {
    TestError::Flow(format!("{:?}", err))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> bistro_core::Handler<TestState, TestError> {
  Box::new(move |state: FlowState<TestState>| {
    Box::pin(async move {
      let mut guard = state.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      tracing::debug!(target: "test_handlers", step = step_name, counter = guard.counter, "executed");
      if guard.halt_at.as_deref() == Some(step_name) {
        return Ok(StepControl::Halt);
      }
      Ok(StepControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> bistro_core::Handler<TestState, TestError> {
  Box::new(move |state: FlowState<TestState>| {
    Box::pin(async move {
      state.write().steps_executed.push(step_name.to_string());
      tracing::warn!(target: "test_handlers", step = step_name, "failing with: '{}'", error_message);
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

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

pub static HANDLER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static SKIP_CHECK_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_EXEC_COUNTER.store(0, Ordering::SeqCst);
  SKIP_CHECK_COUNTER.store(0, Ordering::SeqCst);
}

// --- Menu fixtures ---

pub fn menu_item(name: &str, price: Decimal) -> MenuItem {
  MenuItem {
    id: Uuid::new_v4(),
    category_id: Uuid::new_v4(),
    name: name.to_string(),
    description: None,
    price,
    display_order: None,
    image_url: None,
    is_available: Some(true),
    is_featured: Some(false),
    allergens: None,
  }
}

pub fn espresso() -> MenuItem {
  menu_item("Artisan Espresso", Decimal::new(450, 2))
}

pub fn croissant() -> MenuItem {
  menu_item("Fresh Croissants", Decimal::new(350, 2))
}

pub fn latte() -> MenuItem {
  menu_item("Honey Lavender Latte", Decimal::new(575, 2))
}
