// ============================================================================
// LOCAL STORE - JSON sobre el almacén clave/valor
// ============================================================================

use std::rc::Rc;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::mock_data::MockDataset;
use crate::config::MockConfig;
use crate::error::StorageError;
use crate::models::Record;
use crate::utils::storage::KeyValueStore;

#[derive(Clone)]
pub struct LocalStore {
    store: Rc<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store.get_item(key)
    }

    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store.set_item(key, value)
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove_item(key)
    }

    /// Valor JSON bajo `key`; ausente → `None`, ilegible → `Corrupt`
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get_item(key)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageError::Corrupt {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.store.set_item(key, &json)
    }

    /// Como `get_json`, pero un valor corrupto cuenta como ausente
    pub fn get_json_lenient<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_json(key) {
            Err(StorageError::Corrupt { key, message }) => {
                log::warn!("⚠️ Ignorando datos corruptos en '{}': {}", key, message);
                Ok(None)
            }
            other => other,
        }
    }

    /// Dataset de la entidad; si falta (o está corrupto) se genera y se guarda.
    /// Lecturas sucesivas devuelven siempre lo mismo.
    pub fn load_or_generate<T, R>(
        &self,
        rng: &mut R,
        config: &MockConfig,
        now: DateTime<Utc>,
    ) -> Result<Vec<T>, StorageError>
    where
        T: MockDataset,
        R: Rng + ?Sized,
    {
        if let Some(records) = self.get_json_lenient::<Vec<T>>(T::STORAGE_KEY)? {
            return Ok(records);
        }

        let records = T::generate(rng, config, now);
        self.save_records(&records)?;
        log::info!(
            "🧪 Datos simulados generados: {} {} en '{}'",
            records.len(),
            T::ENTITY,
            T::STORAGE_KEY
        );
        Ok(records)
    }

    pub fn save_records<T: Record>(&self, records: &[T]) -> Result<(), StorageError> {
        self.set_json(T::STORAGE_KEY, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Order, Service};
    use crate::utils::constants::STORAGE_KEY_ORDERS;
    use crate::utils::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn local() -> (Rc<MemoryStore>, LocalStore) {
        let memory = Rc::new(MemoryStore::new());
        (memory.clone(), LocalStore::new(memory))
    }

    #[test]
    fn test_generation_is_idempotent_per_key() {
        let (_, store) = local();
        let config = MockConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        let first: Vec<Order> = store.load_or_generate(&mut rng, &config, Utc::now()).unwrap();
        let second: Vec<Order> = store.load_or_generate(&mut rng, &config, Utc::now()).unwrap();
        assert_eq!(first.len(), 30);
        assert_eq!(first, second);
    }

    #[test]
    fn test_corrupt_dataset_is_regenerated() {
        let (memory, store) = local();
        memory.set_item(STORAGE_KEY_ORDERS, "{not json").unwrap();

        assert!(matches!(
            store.get_json::<Vec<Order>>(STORAGE_KEY_ORDERS),
            Err(StorageError::Corrupt { .. })
        ));

        let mut rng = StdRng::seed_from_u64(2);
        let orders: Vec<Order> = store
            .load_or_generate(&mut rng, &MockConfig::default(), Utc::now())
            .unwrap();
        assert_eq!(orders.len(), 30);
        assert!(store.get_json::<Vec<Order>>(STORAGE_KEY_ORDERS).unwrap().is_some());
    }

    #[test]
    fn test_existing_data_is_kept() {
        let (_, store) = local();
        store.save_records::<Service>(&[]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let services: Vec<Service> = store
            .load_or_generate(&mut rng, &MockConfig::default(), Utc::now())
            .unwrap();
        assert!(services.is_empty());
    }
}
