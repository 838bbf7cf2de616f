use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;

/// Almacén clave/valor de texto (contrato de localStorage)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Almacén en memoria: entorno nativo y tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser_store::BrowserStore;

#[cfg(target_arch = "wasm32")]
mod browser_store {
    use web_sys::{window, Storage};

    use super::KeyValueStore;
    use crate::error::StorageError;

    /// `window.localStorage` del navegador
    pub struct BrowserStore {
        storage: Storage,
    }

    impl BrowserStore {
        pub fn open() -> Result<Self, StorageError> {
            let storage = window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or(StorageError::Unavailable)?;
            Ok(Self { storage })
        }
    }

    impl KeyValueStore for BrowserStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage.get_item(key).map_err(|e| StorageError::Read {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            // QuotaExceededError llega aquí
            self.storage
                .set_item(key, value)
                .map_err(|e| StorageError::Write {
                    key: key.to_string(),
                    message: format!("{:?}", e),
                })
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.storage.remove_item(key).map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip_and_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);

        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove_item("k").unwrap();
        assert!(store.is_empty());
    }
}
