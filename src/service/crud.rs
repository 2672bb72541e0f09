//! Generic CRUD execution against the storage collaborator.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{Entity, Kind, Resource};
use crate::service::RequestValidator;
use crate::storage::Storage;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct CrudService;

impl CrudService {
    /// Fetch one object by id, typed. None if absent.
    pub async fn fetch<R: Resource>(storage: &dyn Storage, id: &str) -> Result<Option<R>, AppError> {
        Ok(storage.get(R::KIND, id).await?.and_then(R::from_entity))
    }

    /// Fetch one object by id. NotFound if absent.
    pub async fn read<R: Resource>(storage: &dyn Storage, id: &str) -> Result<R, AppError> {
        Self::fetch(storage, id).await?.ok_or(AppError::NotFound)
    }

    pub async fn list<R: Resource>(storage: &dyn Storage) -> Result<Vec<R>, AppError> {
        Ok(storage
            .all(R::KIND)
            .await?
            .into_iter()
            .filter_map(R::from_entity)
            .collect())
    }

    /// Objects nested under `parent_id`. NotFound if the parent does not exist.
    pub async fn list_children<R: Resource>(storage: &dyn Storage, parent_id: &str) -> Result<Vec<R>, AppError> {
        let (_, parent_kind) = R::PARENT.ok_or(AppError::NotFound)?;
        Self::ensure_exists(storage, parent_kind, parent_id).await?;
        Ok(Self::list::<R>(storage)
            .await?
            .into_iter()
            .filter(|r| r.parent_id() == Some(parent_id))
            .collect())
    }

    /// Create from a request body. For nested routes the parent must exist
    /// before the body is looked at, and its id overrides any value in the body.
    pub async fn create<R: Resource>(
        storage: &dyn Storage,
        parent_id: Option<&str>,
        body: JsonBody,
    ) -> Result<R, AppError> {
        let parent = match (R::PARENT, parent_id) {
            (Some((field, kind)), Some(id)) => {
                Self::ensure_exists(storage, kind, id).await?;
                Some((field, id))
            }
            _ => None,
        };
        let mut body = body.into_object()?;
        RequestValidator::validate(storage, &body, R::REQUIRED).await?;
        if let Some((field, id)) = parent {
            body.insert(field.to_string(), Value::String(id.to_string()));
        }
        let created = R::from_payload(&body)?;
        Self::persist(storage, created.clone()).await?;
        tracing::info!(kind = %R::KIND, id = %created.id(), "created");
        Ok(created)
    }

    /// Merge a request body into an existing object. Nothing is written unless
    /// every field in the body is valid.
    pub async fn update<R: Resource>(storage: &dyn Storage, id: &str, body: JsonBody) -> Result<R, AppError> {
        let mut updated = Self::read::<R>(storage, id).await?;
        let body = body.into_object()?;
        updated.merge(&body)?;
        updated.base_mut().touch();
        Self::persist(storage, updated.clone()).await?;
        tracing::info!(kind = %R::KIND, id = %id, "updated");
        Ok(updated)
    }

    /// Remove and commit. Dependents are left as they are.
    pub async fn delete<R: Resource>(storage: &dyn Storage, id: &str) -> Result<(), AppError> {
        if !storage.delete(R::KIND, id).await? {
            return Err(AppError::NotFound);
        }
        storage.save().await?;
        tracing::info!(kind = %R::KIND, id = %id, "deleted");
        Ok(())
    }

    /// Object count per collection name.
    pub async fn stats(storage: &dyn Storage) -> Result<BTreeMap<&'static str, usize>, AppError> {
        let mut counts = BTreeMap::new();
        for kind in Kind::ALL {
            counts.insert(kind.collection(), storage.count(kind).await?);
        }
        Ok(counts)
    }

    /// Upsert and commit.
    pub async fn persist(storage: &dyn Storage, entity: impl Into<Entity>) -> Result<(), AppError> {
        storage.upsert(entity.into()).await?;
        storage.save().await?;
        Ok(())
    }

    pub async fn ensure_exists(storage: &dyn Storage, kind: Kind, id: &str) -> Result<(), AppError> {
        match storage.get(kind, id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound),
        }
    }
}
