// bistro/core/src/lib.rs

//! Domain core of the Artisan Bistro ordering service.
//!
//! Nothing in here performs IO:
//!  - [`CartStore`]: the order in progress, one per visitor session.
//!  - [`menu`]: categories and items, plus their display ordering.
//!  - [`forms`]: order and reservation forms and their local validation.
//!  - [`flow`] and [`FlowRegistry`]: a named-step async pipeline engine the
//!    app builds its submission flows on.

pub mod cart;
pub mod error;
pub mod flow;
pub mod forms;
pub mod menu;
pub mod registry;

pub use crate::cart::{CartLine, CartStore};
pub use crate::error::FlowError;
pub use crate::flow::{Flow, FlowOutcome, FlowState, Handler, SkipCondition, StepControl};
pub use crate::forms::{
  validate_order, validate_reservation, FormError, OrderDraft, OrderDraftLine, OrderForm, OrderType, PartySize,
  ReservationDraft, ReservationForm, TimeSlot,
};
pub use crate::menu::{MenuCategory, MenuItem};
pub use crate::registry::FlowRegistry;
