//! Storage
//!
//! Containers persist to an opaque key-value store, one JSON document per
//! container key. Loading never fails: unreadable or malformed documents are
//! logged and replaced by an empty container.

use std::{fmt::Debug, io};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    containers::{Container, ContainerError, ContainerKind},
    items::LineItem,
};

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage IO error")]
    Io(#[from] io::Error),

    /// The stored document is not valid line-item JSON.
    #[error("stored value is not valid JSON")]
    Json(#[from] serde_json::Error),

    /// The stored items break a container invariant.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// Another thread panicked while holding the storage lock.
    #[error("storage lock poisoned")]
    Poisoned,

    /// The key cannot be used as a storage key.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// An opaque, string-valued key-value store that survives restarts.
pub trait Storage: Debug + Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Decode the container stored under its key, if present.
///
/// # Errors
///
/// Returns a [`StorageError`] if the backend fails or the stored document is
/// malformed.
pub fn try_load<K: ContainerKind>(
    storage: &dyn Storage,
) -> Result<Option<Container<K>>, StorageError> {
    let Some(raw) = storage.get_item(K::KEY)? else {
        return Ok(None);
    };

    let items: Vec<LineItem> = serde_json::from_str(&raw)?;

    Ok(Some(Container::with_items(items)?))
}

/// Rehydrate a container, falling back to empty on any failure.
pub fn load<K: ContainerKind>(storage: &dyn Storage) -> Container<K> {
    match try_load::<K>(storage) {
        Ok(Some(container)) => {
            debug!(key = K::KEY, items = container.len(), "rehydrated container");

            container
        }
        Ok(None) => Container::new(),
        Err(error) => {
            warn!(key = K::KEY, %error, "discarding unreadable stored container");

            Container::new()
        }
    }
}

/// Write a container under its key.
///
/// # Errors
///
/// Returns a [`StorageError`] if serialization or the backend write fails.
pub fn save<K: ContainerKind>(
    storage: &dyn Storage,
    container: &Container<K>,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(container.items())?;

    storage.set_item(K::KEY, &raw)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        containers::{Cart, ContainerAction, Favourites, reduce},
        items::{ProductId, test_support::item},
    };

    use super::*;

    #[test]
    fn load_missing_key_is_empty() {
        let storage = MemoryStorage::new();

        assert!(load::<Cart>(&storage).is_empty());
    }

    #[test]
    fn save_then_load_restores_items_in_order() -> TestResult {
        let storage = MemoryStorage::new();
        let cart = Container::<Cart>::with_items([item("p2", 500, 1), item("p1", 1000, 3)])?;

        save(&storage, &cart)?;

        assert_eq!(load::<Cart>(&storage), cart);

        Ok(())
    }

    #[test]
    fn high_precision_prices_survive_a_reload() -> TestResult {
        let storage = MemoryStorage::new();
        let price = Decimal::from_str("1234567890123456789.25")?;
        let discount = Decimal::from_str("12.345")?;

        let mut priced = item("p1", 0, 2);
        priced.price = price;
        priced.cost = Decimal::from_str("0.000000001")?;
        priced.discount = Some(discount);

        let cart = Container::<Cart>::with_items([priced])?;

        save(&storage, &cart)?;

        let restored = load::<Cart>(&storage);
        let restored_item = restored.get(&ProductId::new("p1"));

        assert_eq!(restored_item.map(|item| item.price), Some(price));
        assert_eq!(restored_item.and_then(|item| item.discount), Some(discount));
        assert_eq!(restored, cart);

        Ok(())
    }

    #[test]
    fn containers_use_separate_keys() -> TestResult {
        let storage = MemoryStorage::new();
        let mut favourites = Container::<Favourites>::new();
        reduce(&mut favourites, ContainerAction::add(item("p1", 100, 1), 1));

        save(&storage, &favourites)?;

        assert!(storage.get_item("cart")?.is_none());
        assert!(storage.get_item("favourite")?.is_some());
        assert!(load::<Cart>(&storage).is_empty());
        assert_eq!(load::<Favourites>(&storage).len(), 1);

        Ok(())
    }

    #[test]
    fn malformed_json_resets_to_empty() -> TestResult {
        let storage = MemoryStorage::new();
        storage.set_item("cart", "{not json")?;

        assert!(matches!(try_load::<Cart>(&storage), Err(StorageError::Json(_))));
        assert!(load::<Cart>(&storage).is_empty());

        Ok(())
    }

    #[test]
    fn wrong_shape_resets_to_empty() -> TestResult {
        let storage = MemoryStorage::new();
        storage.set_item("cart", r#"{"items":[]}"#)?;

        assert!(load::<Cart>(&storage).is_empty());

        Ok(())
    }

    #[test]
    fn broken_invariants_reset_to_empty() -> TestResult {
        let storage = MemoryStorage::new();
        let raw = serde_json::to_string(&[item("p1", 100, 1), item("p1", 100, 2)])?;
        storage.set_item("cart", &raw)?;

        assert!(matches!(
            try_load::<Cart>(&storage),
            Err(StorageError::Container(ContainerError::DuplicateProduct(_)))
        ));
        assert!(load::<Cart>(&storage).is_empty());

        Ok(())
    }
}
