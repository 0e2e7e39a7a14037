// bistro/core/src/flow/mod.rs

//! A small async step-flow engine: a `Flow<T, Err>` is a named, ordered list
//! of steps over a shared `FlowState<T>`, each step carrying before/on/after
//! handlers.

pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod state;
pub mod step;

pub use control::{FlowOutcome, StepControl};
pub use definition::{Flow, Handler};
pub use state::FlowState;
pub use step::{SkipCondition, StepDef};
