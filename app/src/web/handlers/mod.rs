// bistro/app/src/web/handlers/mod.rs

pub mod account_handlers;
pub mod cart_handlers;
pub mod menu_handlers;
pub mod order_handlers;
pub mod reservation_handlers;
