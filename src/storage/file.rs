//! JSON file storage: the whole object map lives in memory and every change
//! is written out as `{"<Class>.<id>": {...}}` before it becomes visible.

use super::{MemoryStorage, Storage};
use crate::error::StorageError;
use crate::models::{storage_key, Entity, Kind};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub struct FileStorage {
    path: PathBuf,
    objects: MemoryStorage,
    /// Serializes writers so an older snapshot never lands after a newer one.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Load `path` if it exists; otherwise start empty and create it on first save.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let objects = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => parse_objects(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), count = objects.len(), "loaded file storage");
        Ok(FileStorage {
            path,
            objects: MemoryStorage::from_objects(objects),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a sibling temp file, then rename over the target.
    async fn write_file(&self, objects: &BTreeMap<String, Entity>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(objects)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), count = objects.len(), "saved file storage");
        Ok(())
    }
}

/// Parse the file map and check each key against the object it holds.
fn parse_objects(bytes: &[u8]) -> Result<BTreeMap<String, Entity>, StorageError> {
    let objects: BTreeMap<String, Entity> = serde_json::from_slice(bytes)?;
    for (key, entity) in &objects {
        if *key != entity.storage_key() {
            return Err(StorageError::Corrupt {
                key: key.clone(),
                reason: format!("holds {}", entity.storage_key()),
            });
        }
    }
    Ok(objects)
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Entity>, StorageError> {
        self.objects.get(kind, id).await
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Entity>, StorageError> {
        self.objects.all(kind).await
    }

    /// The map only changes once the file holding the change is on disk.
    async fn upsert(&self, entity: Entity) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.objects.snapshot()?;
        next.insert(entity.storage_key(), entity.clone());
        self.write_file(&next).await?;
        self.objects.upsert(entity).await
    }

    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.objects.snapshot()?;
        if next.remove(&storage_key(kind, id)).is_none() {
            return Ok(false);
        }
        self.write_file(&next).await?;
        self.objects.delete(kind, id).await
    }

    /// Changes are already on disk.
    async fn save(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn count(&self, kind: Kind) -> Result<usize, StorageError> {
        self.objects.count(kind).await
    }
}
