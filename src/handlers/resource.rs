//! Resource CRUD handlers, generic over the entity type. Routes pick the
//! type with a turbofish, e.g. `get(list::<Amenity>)`.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{Entity, Resource};
use crate::response::{success_empty, success_many, success_one, success_one_ok};
use crate::service::CrudService;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

fn to_entities<R: Resource>(rows: Vec<R>) -> Vec<Entity> {
    rows.into_iter().map(Resource::into_entity).collect()
}

pub async fn list<R: Resource>(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list::<R>(state.storage.as_ref()).await?;
    Ok(success_many(to_entities(rows)))
}

/// GET /<parent>/:parent_id/<children>
pub async fn list_children<R: Resource>(
    State(state): State<AppState>,
    Path(parent_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list_children::<R>(state.storage.as_ref(), &parent_id).await?;
    Ok(success_many(to_entities(rows)))
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let row = CrudService::read::<R>(state.storage.as_ref(), &id).await?;
    Ok(success_one_ok(row.into_entity()))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let row = CrudService::create::<R>(state.storage.as_ref(), None, body).await?;
    Ok(success_one(row.into_entity()))
}

/// POST /<parent>/:parent_id/<children>
pub async fn create_child<R: Resource>(
    State(state): State<AppState>,
    Path(parent_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let row = CrudService::create::<R>(state.storage.as_ref(), Some(&parent_id), body).await?;
    Ok(success_one(row.into_entity()))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let row = CrudService::update::<R>(state.storage.as_ref(), &id, body).await?;
    Ok(success_one_ok(row.into_entity()))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    CrudService::delete::<R>(state.storage.as_ref(), &id).await?;
    Ok(success_empty())
}
