//! Storage collaborator: the get/all/upsert/delete/save contract every
//! handler goes through, and its backends.

pub mod file;
pub mod memory;
pub mod pg;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use pg::{ensure_database_exists, ensure_storage_tables, PgStorage};

use crate::config::{StorageBackend, StorageConfig};
use crate::error::StorageError;
use crate::models::{Entity, Kind};
use async_trait::async_trait;
use std::sync::Arc;

/// Object store keyed by kind + id.
///
/// Backends serialize their own mutations; handlers never lock.
/// `upsert` and `delete` stage a change and `save` commits it. Backends
/// that write through treat `save` as a no-op.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Entity>, StorageError>;

    /// Every object of `kind`, in a stable backend-defined order.
    async fn all(&self, kind: Kind) -> Result<Vec<Entity>, StorageError>;

    /// Insert or replace by kind + id.
    async fn upsert(&self, entity: Entity) -> Result<(), StorageError>;

    /// Returns false when nothing was stored under kind + id.
    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, StorageError>;

    async fn save(&self) -> Result<(), StorageError>;

    async fn count(&self, kind: Kind) -> Result<usize, StorageError> {
        Ok(self.all(kind).await?.len())
    }
}

/// Open the backend selected by config.
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn Storage>, StorageError> {
    match &config.backend {
        StorageBackend::Memory => {
            tracing::info!("using in-memory storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::File { path } => {
            tracing::info!(path = %path.display(), "using file storage");
            Ok(Arc::new(FileStorage::open(path.clone()).await?))
        }
        StorageBackend::Database { url, schema } => {
            tracing::info!(schema = %schema, "using postgres storage");
            ensure_database_exists(url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await?;
            ensure_storage_tables(&pool, schema).await?;
            Ok(Arc::new(PgStorage::new(pool, schema.clone())))
        }
    }
}
