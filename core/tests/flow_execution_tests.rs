// tests/flow_execution_tests.rs
mod common;

use bistro_core::{Flow, FlowError, FlowOutcome, FlowState, SkipCondition, StepControl};
use common::*;
use serial_test::serial;
use std::sync::{atomic::Ordering, Arc};

#[tokio::test]
#[serial]
async fn steps_run_in_declared_order() {
  setup_tracing();
  let mut flow = Flow::<TestState, TestError>::new("ordered", &[("one", false, None), ("two", false, None), ("three", false, None)]);
  flow.on_step_boxed("one", create_simple_handler("one", "a"));
  flow.on_step_boxed("two", create_simple_handler("two", "b"));
  flow.on_step_boxed("three", create_simple_handler("three", "c"));

  let state = FlowState::new(TestState::default());
  let outcome = flow.run(state.clone()).await;

  assert_eq!(outcome, Ok(FlowOutcome::Completed));
  let guard = state.read();
  assert_eq!(guard.counter, 3);
  assert_eq!(guard.message, "abc");
  assert_eq!(guard.steps_executed, vec!["one", "two", "three"]);
}

#[tokio::test]
#[serial]
async fn phases_run_before_on_after() {
  setup_tracing();
  let mut flow = Flow::<TestState, TestError>::new("phased", &[("only", false, None)]);
  flow.after_step("only", |state: FlowState<TestState>| async move {
    state.write().message.push_str("after;");
    Ok::<_, TestError>(StepControl::Continue)
  });
  flow.on_step("only", |state: FlowState<TestState>| async move {
    state.write().message.push_str("on;");
    Ok::<_, TestError>(StepControl::Continue)
  });
  flow.before_step("only", |state: FlowState<TestState>| async move {
    state.write().message.push_str("before;");
    Ok::<_, TestError>(StepControl::Continue)
  });

  let state = FlowState::new(TestState::default());
  flow.run(state.clone()).await.expect("flow should complete");
  assert_eq!(state.read().message, "before;on;after;");
}

#[tokio::test]
#[serial]
async fn halting_handler_stops_remaining_steps() {
  setup_tracing();
  let mut flow = Flow::<TestState, TestError>::new("halting", &[("validate", false, None), ("persist", false, None)]);
  flow.on_step_boxed("validate", create_simple_handler("validate", "v"));
  flow.on_step_boxed("persist", create_simple_handler("persist", "p"));

  let state = FlowState::new(TestState {
    halt_at: Some("validate".to_string()),
    ..Default::default()
  });
  let outcome = flow.run(state.clone()).await;

  assert_eq!(outcome, Ok(FlowOutcome::Halted));
  assert_eq!(state.read().steps_executed, vec!["validate"]);
}

#[tokio::test]
#[serial]
async fn handler_error_propagates_and_later_steps_do_not_run() {
  setup_tracing();
  let mut flow = Flow::<TestState, TestError>::new("failing", &[("persist", false, None), ("reset", false, None)]);
  flow.on_step_boxed("persist", create_failing_handler("persist", "insert failed"));
  flow.on_step_boxed("reset", create_simple_handler("reset", "r"));

  let state = FlowState::new(TestState::default());
  let outcome = flow.run(state.clone()).await;

  assert_eq!(outcome, Err(TestError::Handler("insert failed".to_string())));
  assert_eq!(state.read().steps_executed, vec!["persist"]);
}

#[tokio::test]
#[serial]
async fn required_step_without_handlers_is_an_error() {
  setup_tracing();
  let flow = Flow::<TestState, TestError>::new("incomplete", &[("missing", false, None)]);
  let result = flow.run(FlowState::new(TestState::default())).await;

  match result {
    Err(TestError::Flow(s)) => {
      assert!(s.contains("HandlerMissing"));
      assert!(s.contains("missing"));
    }
    other => panic!("expected HandlerMissing, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn optional_step_without_handlers_is_skipped() {
  setup_tracing();
  let mut flow = Flow::<TestState, TestError>::new("optional", &[("maybe", true, None), ("always", false, None)]);
  flow.on_step_boxed("always", create_simple_handler("always", "x"));

  let state = FlowState::new(TestState::default());
  assert_eq!(flow.run(state.clone()).await, Ok(FlowOutcome::Completed));
  assert_eq!(state.read().steps_executed, vec!["always"]);
}

#[tokio::test]
#[serial]
async fn skip_condition_is_checked_against_current_state() {
  setup_tracing();
  reset_counters();
  let skip_when_counter_set: SkipCondition<TestState> = Arc::new(|state: FlowState<TestState>| {
    SKIP_CHECK_COUNTER.fetch_add(1, Ordering::SeqCst);
    state.read().counter > 0
  });
  let mut flow = Flow::<TestState, TestError>::new(
    "conditional",
    &[("first", false, None), ("second", false, Some(skip_when_counter_set))],
  );
  flow.on_step_boxed("first", create_simple_handler("first", "1"));
  flow.on_step("second", |state: FlowState<TestState>| async move {
    HANDLER_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    state.write().steps_executed.push("second".to_string());
    Ok::<_, TestError>(StepControl::Continue)
  });

  let state = FlowState::new(TestState::default());
  flow.run(state.clone()).await.expect("flow should complete");

  assert_eq!(SKIP_CHECK_COUNTER.load(Ordering::SeqCst), 1);
  assert_eq!(HANDLER_EXEC_COUNTER.load(Ordering::SeqCst), 0);
  assert_eq!(state.read().steps_executed, vec!["first"]);
}

#[tokio::test]
#[serial]
async fn set_skip_condition_on_unknown_step_fails() {
  setup_tracing();
  let mut flow = Flow::<TestState, TestError>::new("named", &[("known", false, None)]);
  let err = flow.set_skip_condition("unknown", None).unwrap_err();
  assert!(matches!(err, FlowError::StepNotFound { ref step_name } if step_name == "unknown"));
  let always: SkipCondition<TestState> = Arc::new(|_| true);
  assert!(flow.set_skip_condition("known", Some(always)).is_ok());
  assert_eq!(flow.step_names(), vec!["known"]);
}

#[tokio::test]
#[serial]
#[should_panic(expected = "is not declared")]
async fn registering_handler_for_undeclared_step_panics() {
  let mut flow = Flow::<TestState, TestError>::new("typo", &[("declared", false, None)]);
  flow.on_step_boxed("declard", create_simple_handler("declard", ""));
}

#[tokio::test]
#[serial]
async fn flow_error_type_can_be_used_directly() {
  setup_tracing();
  let mut flow = Flow::<TestState, FlowError>::new("plain", &[("task", false, None)]);
  flow.on_step("task", |_state: FlowState<TestState>| async move {
    Err::<StepControl, _>(FlowError::Internal("backend unavailable".to_string()))
  });

  match flow.run(FlowState::new(TestState::default())).await {
    Err(FlowError::Internal(msg)) => assert_eq!(msg, "backend unavailable"),
    other => panic!("expected FlowError::Internal, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn anyhow_errors_convert_into_handler_error() {
  setup_tracing();
  let mut flow = Flow::<TestState, FlowError>::new("anyhow", &[("task", false, None)]);
  flow.on_step("task", |_state: FlowState<TestState>| async move {
    Err::<StepControl, _>(anyhow::anyhow!("connection reset"))
  });

  let err = flow.run(FlowState::new(TestState::default())).await.unwrap_err();
  assert!(matches!(err, FlowError::HandlerError { .. }));
  assert!(format!("{:?}", err).contains("connection reset"));
}
