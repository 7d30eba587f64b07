//! Kiosk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError},
    checkout::{
        CheckoutError, DeliveryDetails, HttpOrderService, OrderRequest, OrderService,
        OrderServiceError, PendingOrder, place_order, sync_cart, sync_favourites,
    },
    containers::{Cart, Container, ContainerAction, ContainerError, ContainerKind, Favourites},
    items::{LineItem, OrderLine, ProductId},
    pricing::{DeliveryPolicy, PricingError, Totals},
    products::Product,
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
    store::{CartStore, FavouritesStore, Store, SubscriptionId},
};
