// bistro/core/src/flow/execution.rs

//! `Flow::run`: walks the declared steps in order and drives each step's
//! handlers phase by phase.

use super::control::{FlowOutcome, StepControl};
use super::definition::{Flow, Handler};
use super::state::FlowState;
use crate::error::FlowError;
use tracing::{event, instrument, Instrument, Level};

/// Result of running one phase of one step.
enum PhaseResult {
  Continue,
  Halted,
}

impl<T, Err> Flow<T, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step against `state`.
  ///
  /// Returns `Halted` as soon as a handler asks to halt and the first handler
  /// error as-is. A non-optional step without any handler is a
  /// `FlowError::HandlerMissing`, converted into `Err`.
  #[instrument(
    name = "Flow::run",
    skip_all,
    fields(flow = self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, state: FlowState<T>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow starting.");

    for (step_idx, step) in self.steps.iter().enumerate() {
      let step_span = tracing::info_span!("flow_step", step = %step.name, step_index = step_idx);

      if let Some(skip_if) = &step.skip_if {
        if skip_if(state.clone()) {
          step_span.in_scope(|| event!(Level::INFO, "Step skipped by its skip condition."));
          continue;
        }
      }

      let handlers = match self.handlers.get(&step.name) {
        Some(handlers) if !handlers.is_empty() => handlers,
        _ if step.optional => {
          step_span.in_scope(|| event!(Level::DEBUG, "Optional step has no handlers, skipping."));
          continue;
        }
        _ => {
          step_span.in_scope(|| event!(Level::ERROR, "Non-optional step has no handlers."));
          return Err(Err::from(FlowError::HandlerMissing {
            step_name: step.name.clone(),
          }));
        }
      };

      let phases: [(&str, &Vec<Handler<T, Err>>); 3] =
        [("before", &handlers.before), ("on", &handlers.on), ("after", &handlers.after)];

      for (phase, phase_handlers) in phases {
        match run_phase(phase, phase_handlers, &state).instrument(step_span.clone()).await? {
          PhaseResult::Continue => {}
          PhaseResult::Halted => return Ok(FlowOutcome::Halted),
        }
      }
      step_span.in_scope(|| event!(Level::DEBUG, "Step finished."));
    }

    event!(Level::DEBUG, "Flow completed.");
    Ok(FlowOutcome::Completed)
  }
}

async fn run_phase<T, Err>(
  phase: &str,
  handlers: &[Handler<T, Err>],
  state: &FlowState<T>,
) -> Result<PhaseResult, Err>
where
  T: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  for (handler_idx, handler) in handlers.iter().enumerate() {
    match handler(state.clone()).await {
      Ok(StepControl::Continue) => {}
      Ok(StepControl::Halt) => {
        event!(Level::INFO, phase, handler_idx, "Flow halted by handler.");
        return Ok(PhaseResult::Halted);
      }
      Err(e) => {
        event!(Level::WARN, phase, handler_idx, error = %e, "Handler failed.");
        return Err(e);
      }
    }
  }
  Ok(PhaseResult::Continue)
}
