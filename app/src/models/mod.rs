// bistro/app/src/models/mod.rs

//! Rows of the order, reservation and profile tables. Menu rows live in
//! `bistro_core::menu`.

pub mod order;
pub mod order_item;
pub mod profile;
pub mod reservation;

pub use order::{Order, OrderStatus, PlacedOrder};
pub use order_item::OrderItem;
pub use profile::{AccountOverview, Profile, ProfileUpdate};
pub use reservation::{Reservation, ReservationStatus};
