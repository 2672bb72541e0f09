//! In-memory storage for tests and development. Uses RwLock for thread-safe access.

use super::Storage;
use crate::error::StorageError;
use crate::models::{storage_key, Entity, Kind};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Objects keyed `<Class>.<id>`; iteration order is key order.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<RwLock<BTreeMap<String, Entity>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_objects(objects: BTreeMap<String, Entity>) -> Self {
        MemoryStorage {
            objects: Arc::new(RwLock::new(objects)),
        }
    }

    /// Copy of every stored object, for backends that persist the whole map.
    pub(crate) fn snapshot(&self) -> Result<BTreeMap<String, Entity>, StorageError> {
        let objects = self
            .objects
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(objects.clone())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Entity>, StorageError> {
        let objects = self
            .objects
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(objects.get(&storage_key(kind, id)).cloned())
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Entity>, StorageError> {
        let objects = self
            .objects
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        let prefix = format!("{}.", kind.class_name());
        Ok(objects
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .map(|(_, entity)| entity.clone())
            .collect())
    }

    async fn upsert(&self, entity: Entity) -> Result<(), StorageError> {
        let mut objects = self
            .objects
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        objects.insert(entity.storage_key(), entity);
        Ok(())
    }

    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, StorageError> {
        let mut objects = self
            .objects
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(objects.remove(&storage_key(kind, id)).is_some())
    }

    async fn save(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
