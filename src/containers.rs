//! Containers
//!
//! Cart and favourites share a single container type, parametrized by a
//! [`ContainerKind`] marker. All state transitions go through [`reduce`], which
//! is pure: persistence and notifications are layered on by
//! [`Store`](crate::store::Store).

use std::{fmt, marker::PhantomData};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::items::{LineItem, OrderLine, ProductId};

/// Marker describing one named container.
pub trait ContainerKind: fmt::Debug + 'static {
    /// Key the container is persisted under.
    const KEY: &'static str;

    /// Human-readable label.
    const LABEL: &'static str;
}

/// Shopping cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cart;

impl ContainerKind for Cart {
    const KEY: &'static str = "cart";
    const LABEL: &'static str = "cart";
}

/// Favourites list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Favourites;

impl ContainerKind for Favourites {
    const KEY: &'static str = "favourite";
    const LABEL: &'static str = "favourites";
}

/// Errors raised when building a container from existing items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// Two items share a product identifier.
    #[error("product {0} appears more than once")]
    DuplicateProduct(ProductId),

    /// An item holds zero units.
    #[error("product {0} has a zero quantity")]
    ZeroQuantity(ProductId),
}

/// Operations a container accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerAction {
    /// Add `quantity` units of `item`, merging by product id.
    Add {
        /// Item snapshot; only used when the product is not held yet.
        item: LineItem,
        /// Units to add.
        quantity: u32,
    },

    /// Add one unit of a held product.
    Increase(ProductId),

    /// Remove one unit of a held product, dropping it at the last unit.
    Decrease(ProductId),

    /// Drop a product regardless of quantity.
    Remove(ProductId),

    /// Drop every product.
    Clear,
}

impl ContainerAction {
    /// Shorthand for [`ContainerAction::Add`].
    pub fn add(item: LineItem, quantity: u32) -> Self {
        Self::Add { item, quantity }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Increase(_) => "increase",
            Self::Decrease(_) => "decrease",
            Self::Remove(_) => "remove",
            Self::Clear => "clear",
        }
    }
}

/// An ordered list of line items, unique by product id, every quantity >= 1.
pub struct Container<K: ContainerKind> {
    items: Vec<LineItem>,
    kind: PhantomData<K>,
}

impl<K: ContainerKind> Container<K> {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            kind: PhantomData,
        }
    }

    /// Create a container from existing items.
    ///
    /// # Errors
    ///
    /// Returns a [`ContainerError`] if a product id repeats or an item holds
    /// zero units.
    pub fn with_items(items: impl Into<Vec<LineItem>>) -> Result<Self, ContainerError> {
        let items = items.into();
        let mut seen = FxHashSet::default();

        items.iter().try_for_each(|item| {
            if item.quantity == 0 {
                return Err(ContainerError::ZeroQuantity(item.product_id.clone()));
            }

            if seen.insert(&item.product_id) {
                Ok(())
            } else {
                Err(ContainerError::DuplicateProduct(item.product_id.clone()))
            }
        })?;

        Ok(Self {
            items,
            kind: PhantomData,
        })
    }

    /// Key this container is persisted under.
    pub fn key(&self) -> &'static str {
        K::KEY
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the items.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Look up the item for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    /// Check whether a product is held.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the container is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all products.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// `{productId, qty}` lines for every held product.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.items.iter().map(LineItem::order_line).collect()
    }

    /// Consume the container, returning its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product_id == product_id)
    }
}

impl<K: ContainerKind> Default for Container<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ContainerKind> Clone for Container<K> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            kind: PhantomData,
        }
    }
}

impl<'a, K: ContainerKind> IntoIterator for &'a Container<K> {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<K: ContainerKind> PartialEq for Container<K> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<K: ContainerKind> fmt::Debug for Container<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("key", &K::KEY)
            .field("items", &self.items)
            .finish()
    }
}

/// Apply an action to a container.
///
/// Returns `true` if the items changed. Unknown product ids and zero-unit
/// adds leave the container untouched.
pub fn reduce<K: ContainerKind>(container: &mut Container<K>, action: ContainerAction) -> bool {
    match action {
        ContainerAction::Add { item, quantity } => {
            if quantity == 0 {
                return false;
            }

            if let Some(existing) = container
                .items
                .iter_mut()
                .find(|existing| existing.product_id == item.product_id)
            {
                let before = existing.quantity;

                existing.quantity = existing.quantity.saturating_add(quantity);

                return existing.quantity != before;
            }

            container.items.push(item.with_quantity(quantity));

            true
        }
        ContainerAction::Increase(product_id) => {
            let Some(existing) = container
                .items
                .iter_mut()
                .find(|existing| existing.product_id == product_id)
            else {
                return false;
            };

            let before = existing.quantity;

            existing.quantity = existing.quantity.saturating_add(1);

            existing.quantity != before
        }
        ContainerAction::Decrease(product_id) => {
            let Some(index) = container.position(&product_id) else {
                return false;
            };

            match container.items.get_mut(index) {
                Some(existing) if existing.quantity > 1 => existing.quantity -= 1,
                _ => {
                    container.items.remove(index);
                }
            }

            true
        }
        ContainerAction::Remove(product_id) => {
            let before = container.items.len();

            container.items.retain(|item| item.product_id != product_id);

            container.items.len() != before
        }
        ContainerAction::Clear => {
            let changed = !container.items.is_empty();

            container.items.clear();

            changed
        }
    }
}
