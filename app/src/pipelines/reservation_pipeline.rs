// bistro/app/src/pipelines/reservation_pipeline.rs
use crate::errors::AppError;
use crate::pipelines::contexts::ReservationSubmissionCtxData;
use crate::state::AppState;
use bistro_core::{validate_reservation, Flow, FlowRegistry, FlowState, StepControl};
use tracing::{error, info, warn};

pub fn register_reservation_pipeline(registry: &FlowRegistry<AppError>, _app_state: &AppState) {
  let mut flow = Flow::<ReservationSubmissionCtxData, AppError>::new(
    "reservation_submission",
    &[
      ("validate_reservation_input", false, None),
      ("persist_reservation", false, None),
      ("reset_reservation_form", false, None),
    ],
  );

  flow.on_step(
    "validate_reservation_input",
    |ctx: FlowState<ReservationSubmissionCtxData>| async move {
      let (sessions, session_id, today) = {
        let guard = ctx.read();
        (guard.app_state.sessions.clone(), guard.session_id, guard.today)
      };

      let validated = sessions.with_session(session_id, |session| validate_reservation(&session.reservation_form, today));
      match validated {
        Ok(draft) => {
          info!(
            %session_id,
            date = %draft.reservation_date,
            time = %draft.reservation_time,
            party_size = draft.party_size.get(),
            "Reservation input validated."
          );
          ctx.write().draft = Some(draft);
          Ok(StepControl::Continue)
        }
        Err(form_err) => {
          warn!(%session_id, error = %form_err, "Reservation input rejected.");
          Err(AppError::from(form_err))
        }
      }
    },
  );

  flow.on_step("persist_reservation", |ctx: FlowState<ReservationSubmissionCtxData>| async move {
    let (store, user_id, draft) = {
      let guard = ctx.read();
      (guard.app_state.store.clone(), guard.user_id, guard.draft.clone())
    };
    let draft = draft.ok_or_else(|| AppError::Internal("Reservation draft missing after validation.".to_string()))?;

    let reservation = store.create_reservation(user_id, &draft).await.map_err(|e| {
      error!(error = %e, "Failed to submit reservation.");
      AppError::Backend("Failed to submit reservation".to_string())
    })?;
    info!(reservation_id = %reservation.id, "Reservation submitted.");
    ctx.write().reservation = Some(reservation);
    Ok::<_, AppError>(StepControl::Continue)
  });

  flow.on_step("reset_reservation_form", |ctx: FlowState<ReservationSubmissionCtxData>| async move {
    let (sessions, session_id) = {
      let guard = ctx.read();
      (guard.app_state.sessions.clone(), guard.session_id)
    };
    sessions.with_session(session_id, |session| session.reservation_form = Default::default());
    Ok::<_, AppError>(StepControl::Continue)
  });

  registry.register(flow);
}
