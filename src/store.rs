//! Store
//!
//! A [`Store`] owns one container, rehydrates it from storage when built and
//! writes it back after every dispatched action. Listeners registered with
//! [`Store::subscribe`] see the container after each change.

use std::{fmt, sync::Arc};

use tracing::{debug, warn};

use crate::{
    containers::{Cart, Container, ContainerAction, ContainerKind, Favourites, reduce},
    items::{LineItem, ProductId},
    pricing::{DeliveryPolicy, PricingError, Totals},
    storage::{self, Storage},
};

/// Store for the shopping cart.
pub type CartStore = Store<Cart>;

/// Store for the favourites list.
pub type FavouritesStore = Store<Favourites>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<K> = Box<dyn FnMut(&Container<K>) + Send>;

/// A persisted container with change notifications.
pub struct Store<K: ContainerKind> {
    container: Container<K>,
    storage: Arc<dyn Storage>,
    listeners: Vec<(SubscriptionId, Listener<K>)>,
    next_subscription: u64,
}

impl<K: ContainerKind> Store<K> {
    /// Build a store, rehydrating its container from `storage`.
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let container = storage::load::<K>(storage.as_ref());

        Self {
            container,
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current container state.
    pub fn get(&self) -> &Container<K> {
        &self.container
    }

    /// Apply an action, persist the result and notify listeners.
    ///
    /// Returns `true` if the container changed. Persistence failures are
    /// logged; the in-memory state is kept either way.
    pub fn dispatch(&mut self, action: ContainerAction) -> bool {
        let name = action.name();
        let changed = reduce(&mut self.container, action);

        debug!(
            container = K::KEY,
            action = name,
            changed,
            items = self.container.len(),
            "dispatched container action"
        );

        if let Err(error) = storage::save(self.storage.as_ref(), &self.container) {
            warn!(container = K::KEY, %error, "failed to persist container");
        }

        if changed {
            for (_, listener) in &mut self.listeners {
                listener(&self.container);
            }
        }

        changed
    }

    /// Register a listener called after every change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&Container<K>) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);

        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));

        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();

        self.listeners.retain(|(listener_id, _)| *listener_id != id);

        self.listeners.len() != before
    }

    /// Add `quantity` units of `item`.
    pub fn add(&mut self, item: LineItem, quantity: u32) -> bool {
        self.dispatch(ContainerAction::add(item, quantity))
    }

    /// Add one unit of a held product.
    pub fn increase(&mut self, product_id: &ProductId) -> bool {
        self.dispatch(ContainerAction::Increase(product_id.clone()))
    }

    /// Remove one unit of a held product.
    pub fn decrease(&mut self, product_id: &ProductId) -> bool {
        self.dispatch(ContainerAction::Decrease(product_id.clone()))
    }

    /// Drop a product entirely.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        self.dispatch(ContainerAction::Remove(product_id.clone()))
    }

    /// Drop every product.
    pub fn clear(&mut self) -> bool {
        self.dispatch(ContainerAction::Clear)
    }

    /// Totals for the current items.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the arithmetic overflows.
    pub fn totals(&self, policy: &DeliveryPolicy) -> Result<Totals, PricingError> {
        Totals::calculate(self.container.items(), policy)
    }
}

impl<K: ContainerKind> fmt::Debug for Store<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("container", &self.container)
            .field("storage", &self.storage)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
