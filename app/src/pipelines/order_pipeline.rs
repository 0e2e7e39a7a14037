// bistro/app/src/pipelines/order_pipeline.rs
use crate::errors::AppError;
use crate::pipelines::contexts::OrderSubmissionCtxData;
use crate::state::AppState;
use bistro_core::{validate_order, Flow, FlowRegistry, FlowState, StepControl};
use tracing::{error, info, warn};

pub fn register_order_pipeline(registry: &FlowRegistry<AppError>, _app_state: &AppState) {
  let mut flow = Flow::<OrderSubmissionCtxData, AppError>::new(
    "order_submission",
    &[
      ("validate_order_input", false, None),
      ("persist_order", false, None),
      ("reset_order_session", false, None),
    ],
  );

  // Step 1: cart and contact fields, checked against the session before any
  // store call.
  flow.on_step("validate_order_input", |ctx: FlowState<OrderSubmissionCtxData>| async move {
    let (sessions, session_id) = {
      let guard = ctx.read();
      (guard.app_state.sessions.clone(), guard.session_id)
    };

    let validated = sessions.with_session(session_id, |session| validate_order(&session.cart, &session.order_form));
    match validated {
      Ok(draft) => {
        info!(
          %session_id,
          lines = draft.lines.len(),
          total = %draft.total_amount,
          "Order input validated."
        );
        ctx.write().draft = Some(draft);
        Ok(StepControl::Continue)
      }
      Err(form_err) => {
        warn!(%session_id, error = %form_err, "Order input rejected.");
        Err(AppError::from(form_err))
      }
    }
  });

  // Step 2: order and items in one store transaction.
  flow.on_step("persist_order", |ctx: FlowState<OrderSubmissionCtxData>| async move {
    let (store, user_id, draft) = {
      let guard = ctx.read();
      (guard.app_state.store.clone(), guard.user_id, guard.draft.clone())
    };
    let draft = draft.ok_or_else(|| AppError::Internal("Order draft missing after validation.".to_string()))?;

    let placed = store.place_order(user_id, &draft).await.map_err(|e| {
      error!(error = %e, "Failed to place order.");
      AppError::Backend("Failed to place order".to_string())
    })?;
    info!(order_id = %placed.order.id, items = placed.items.len(), "Order placed.");
    ctx.write().placed = Some(placed);
    Ok::<_, AppError>(StepControl::Continue)
  });

  // Step 3: take the ordered lines out of the cart and start a fresh order
  // form. Lines added while the order was being written stay in the cart.
  flow.on_step("reset_order_session", |ctx: FlowState<OrderSubmissionCtxData>| async move {
    let (sessions, session_id, draft) = {
      let guard = ctx.read();
      (guard.app_state.sessions.clone(), guard.session_id, guard.draft.clone())
    };
    let draft = draft.ok_or_else(|| AppError::Internal("Order draft missing after persisting.".to_string()))?;
    let remaining = sessions.with_session(session_id, |session| {
      session.cart.remove_ordered(&draft.lines);
      session.order_form = Default::default();
      session.cart.len()
    });
    if remaining > 0 {
      info!(%session_id, remaining, "Lines added during submission kept in the cart.");
    }
    Ok::<_, AppError>(StepControl::Continue)
  });

  registry.register(flow);
}
