//! Place ↔ Amenity links. The place holds the list of linked amenity ids.

use crate::error::AppError;
use crate::models::{Amenity, Entity, Kind, Place, Resource};
use crate::service::CrudService;
use crate::storage::Storage;

/// Amenities linked to a place. Ids whose amenity has since been deleted are skipped.
pub async fn place_amenities(storage: &dyn Storage, place_id: &str) -> Result<Vec<Amenity>, AppError> {
    let place = CrudService::read::<Place>(storage, place_id).await?;
    let mut amenities = Vec::with_capacity(place.amenity_ids.len());
    for amenity_id in &place.amenity_ids {
        if let Some(amenity) = CrudService::fetch::<Amenity>(storage, amenity_id).await? {
            amenities.push(amenity);
        }
    }
    Ok(amenities)
}

/// Link an amenity to a place. Returns the amenity and whether the link is new.
pub async fn link_amenity(
    storage: &dyn Storage,
    place_id: &str,
    amenity_id: &str,
) -> Result<(Amenity, bool), AppError> {
    let mut place = CrudService::read::<Place>(storage, place_id).await?;
    let amenity = CrudService::read::<Amenity>(storage, amenity_id).await?;
    if place.has_amenity(amenity_id) {
        return Ok((amenity, false));
    }
    place.amenity_ids.push(amenity_id.to_string());
    place.base_mut().touch();
    CrudService::persist(storage, Entity::Place(place)).await?;
    tracing::info!(place = %place_id, amenity = %amenity_id, "linked amenity");
    Ok((amenity, true))
}

/// Unlink an amenity from a place. NotFound if either is missing or they are not linked.
pub async fn unlink_amenity(storage: &dyn Storage, place_id: &str, amenity_id: &str) -> Result<(), AppError> {
    let mut place = CrudService::read::<Place>(storage, place_id).await?;
    CrudService::ensure_exists(storage, Kind::Amenity, amenity_id).await?;
    if !place.has_amenity(amenity_id) {
        return Err(AppError::NotFound);
    }
    place.amenity_ids.retain(|a| a != amenity_id);
    place.base_mut().touch();
    CrudService::persist(storage, Entity::Place(place)).await?;
    tracing::info!(place = %place_id, amenity = %amenity_id, "unlinked amenity");
    Ok(())
}
