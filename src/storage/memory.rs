//! In-memory storage

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use super::{Storage, StorageError};

/// Storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_err| StorageError::Poisoned)?;

        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_err| StorageError::Poisoned)?;

        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_err| StorageError::Poisoned)?;

        entries.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_get_remove() -> TestResult {
        let storage = MemoryStorage::new();

        storage.set_item("cart", "[]")?;
        assert_eq!(storage.get_item("cart")?.as_deref(), Some("[]"));

        storage.remove_item("cart")?;
        assert_eq!(storage.get_item("cart")?, None);

        Ok(())
    }
}
