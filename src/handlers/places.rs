//! Place search and the place/amenity link routes.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{Entity, Resource};
use crate::response::{success_empty, success_many, success_one, success_one_ok};
use crate::service::{links, search_places, PlaceSearch};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

/// POST /places_search
pub async fn places_search(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let criteria = PlaceSearch::from_body(body)?;
    let places = search_places(state.storage.as_ref(), &criteria).await?;
    Ok(success_many(
        places.into_iter().map(Resource::into_entity).collect::<Vec<Entity>>(),
    ))
}

/// GET /places/:place_id/amenities
pub async fn list_place_amenities(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let amenities = links::place_amenities(state.storage.as_ref(), &place_id).await?;
    Ok(success_many(
        amenities.into_iter().map(Resource::into_entity).collect::<Vec<Entity>>(),
    ))
}

/// POST /places/:place_id/amenities/:amenity_id. 201 for a new link, 200 if already linked.
pub async fn link_place_amenity(
    State(state): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (amenity, created) = links::link_amenity(state.storage.as_ref(), &place_id, &amenity_id).await?;
    let amenity = amenity.into_entity();
    Ok(if created {
        success_one(amenity)
    } else {
        success_one_ok(amenity)
    })
}

/// DELETE /places/:place_id/amenities/:amenity_id
pub async fn unlink_place_amenity(
    State(state): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    links::unlink_amenity(state.storage.as_ref(), &place_id, &amenity_id).await?;
    Ok(success_empty())
}
