//! Kiosk
//!
//! Kiosk is the client-side state core of a retail storefront: a persisted
//! cart and favourites list keyed by product, derived totals with a
//! free-delivery threshold, and the checkout boundary that turns a cart into
//! an order for the storefront API.

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod containers;
pub mod items;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod store;
pub mod summary;
