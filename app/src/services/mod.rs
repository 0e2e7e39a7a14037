// bistro/app/src/services/mod.rs

//! Read-mostly gateways over the store used by the web handlers.

pub mod account_gateway;
pub mod menu_gateway;
