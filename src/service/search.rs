//! Place search by states, cities and amenities.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{City, Kind, Payload, Place};
use crate::service::CrudService;
use crate::storage::Storage;
use serde_json::Value;
use std::collections::HashSet;

/// Search criteria. Each list holds ids; empty means "not given".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaceSearch {
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub amenities: Vec<String>,
}

impl PlaceSearch {
    /// A missing or non-object body is an empty search. A criteria key that is
    /// present but not a list of string ids is rejected.
    pub fn from_body(body: JsonBody) -> Result<Self, AppError> {
        let Some(payload) = body.0 else {
            return Ok(Self::default());
        };
        Ok(PlaceSearch {
            states: id_list(&payload, "states")?,
            cities: id_list(&payload, "cities")?,
            amenities: id_list(&payload, "amenities")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.cities.is_empty() && self.amenities.is_empty()
    }
}

fn id_list(payload: &Payload, key: &str) -> Result<Vec<String>, AppError> {
    let invalid = || AppError::BadRequest("Invalid search criteria".into());
    match payload.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        Some(_) => Err(invalid()),
    }
}

/// Places matching `criteria`.
///
/// With no states or cities every place is a candidate; otherwise candidates
/// are the places of each given state's cities plus those of each given
/// city, without duplicates, in first-seen order. Amenities then narrow the
/// candidates to places that have all of them. Ids that do not resolve add
/// nothing.
pub async fn search_places(storage: &dyn Storage, criteria: &PlaceSearch) -> Result<Vec<Place>, AppError> {
    let places = CrudService::list::<Place>(storage).await?;
    if criteria.is_empty() {
        return Ok(places);
    }

    let candidates = if criteria.states.is_empty() && criteria.cities.is_empty() {
        places
    } else {
        let cities = CrudService::list::<City>(storage).await?;
        let mut city_ids: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for state_id in &criteria.states {
            if storage.get(Kind::State, state_id).await?.is_none() {
                continue;
            }
            for city in cities.iter().filter(|c| c.state_id == *state_id) {
                if seen.insert(city.base.id.as_str()) {
                    city_ids.push(city.base.id.as_str());
                }
            }
        }
        for city_id in &criteria.cities {
            if let Some(city) = cities.iter().find(|c| c.base.id == *city_id) {
                if seen.insert(city.base.id.as_str()) {
                    city_ids.push(city.base.id.as_str());
                }
            }
        }
        // A place belongs to exactly one city, so distinct cities give distinct places.
        city_ids
            .iter()
            .flat_map(|city_id| places.iter().filter(move |p| p.city_id == *city_id))
            .cloned()
            .collect()
    };

    let mut required: Vec<&str> = Vec::new();
    for amenity_id in &criteria.amenities {
        if storage.get(Kind::Amenity, amenity_id).await?.is_some() && !required.contains(&amenity_id.as_str()) {
            required.push(amenity_id.as_str());
        }
    }

    tracing::debug!(
        candidates = candidates.len(),
        amenities = required.len(),
        "place search"
    );
    Ok(candidates
        .into_iter()
        .filter(|p| required.iter().all(|a| p.has_amenity(a)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amenity, BaseModel, Entity, State};
    use crate::storage::MemoryStorage;
    use serde_json::json;

    struct World {
        storage: MemoryStorage,
        california: String,
        nevada: String,
        sf: String,
        la: String,
        reno: String,
        wifi: String,
        pool: String,
    }

    fn place(city_id: &str, name: &str, amenity_ids: &[&str]) -> Place {
        Place {
            base: BaseModel::new(),
            city_id: city_id.into(),
            user_id: "u1".into(),
            name: name.into(),
            description: String::new(),
            number_rooms: 1,
            number_bathrooms: 1,
            max_guest: 2,
            price_by_night: 100,
            latitude: 0.0,
            longitude: 0.0,
            amenity_ids: amenity_ids.iter().map(|a| a.to_string()).collect(),
        }
    }

    async fn world() -> World {
        let storage = MemoryStorage::new();
        let mut ids = Vec::new();
        for name in ["California", "Nevada"] {
            let s = State { base: BaseModel::new(), name: name.into() };
            ids.push(s.base.id.clone());
            storage.upsert(Entity::State(s)).await.unwrap();
        }
        let (california, nevada) = (ids[0].clone(), ids[1].clone());
        let mut city_ids = Vec::new();
        for (state_id, name) in [(&california, "SF"), (&california, "LA"), (&nevada, "Reno")] {
            let c = City { base: BaseModel::new(), state_id: state_id.clone(), name: name.into() };
            city_ids.push(c.base.id.clone());
            storage.upsert(Entity::City(c)).await.unwrap();
        }
        let (sf, la, reno) = (city_ids[0].clone(), city_ids[1].clone(), city_ids[2].clone());
        let mut amenity_ids = Vec::new();
        for name in ["Wifi", "Pool"] {
            let a = Amenity { base: BaseModel::new(), name: name.into() };
            amenity_ids.push(a.base.id.clone());
            storage.upsert(Entity::Amenity(a)).await.unwrap();
        }
        let (wifi, pool) = (amenity_ids[0].clone(), amenity_ids[1].clone());

        for p in [
            place(&sf, "sf-both", &[wifi.as_str(), pool.as_str()]),
            place(&sf, "sf-wifi", &[wifi.as_str()]),
            place(&la, "la-none", &[]),
            place(&reno, "reno-pool", &[pool.as_str()]),
        ] {
            storage.upsert(Entity::Place(p)).await.unwrap();
        }
        World { storage, california, nevada, sf, la, reno, wifi, pool }
    }

    fn names(places: &[Place]) -> Vec<&str> {
        let mut names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    fn criteria(v: Value) -> PlaceSearch {
        PlaceSearch::from_body(JsonBody(v.as_object().cloned())).unwrap()
    }

    #[tokio::test]
    async fn empty_criteria_returns_everything() {
        let w = world().await;
        for c in [criteria(json!({})), criteria(json!({"states": [], "cities": [], "amenities": []}))] {
            assert_eq!(search_places(&w.storage, &c).await.unwrap().len(), 4);
        }
        let no_body = PlaceSearch::from_body(JsonBody(None)).unwrap();
        assert_eq!(search_places(&w.storage, &no_body).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn states_and_cities_union_without_duplicates() {
        let w = world().await;
        let c = criteria(json!({"states": [&w.california], "cities": [&w.sf, &w.reno]}));
        let found = search_places(&w.storage, &c).await.unwrap();
        assert_eq!(names(&found), vec!["la-none", "reno-pool", "sf-both", "sf-wifi"]);

        let c = criteria(json!({"states": [&w.nevada]}));
        assert_eq!(names(&search_places(&w.storage, &c).await.unwrap()), vec!["reno-pool"]);

        let c = criteria(json!({"cities": [&w.la]}));
        assert_eq!(names(&search_places(&w.storage, &c).await.unwrap()), vec!["la-none"]);
    }

    #[tokio::test]
    async fn amenities_require_all() {
        let w = world().await;
        let c = criteria(json!({"amenities": [&w.wifi, &w.pool]}));
        assert_eq!(names(&search_places(&w.storage, &c).await.unwrap()), vec!["sf-both"]);

        let c = criteria(json!({"states": [&w.california], "amenities": [&w.wifi]}));
        assert_eq!(
            names(&search_places(&w.storage, &c).await.unwrap()),
            vec!["sf-both", "sf-wifi"]
        );
    }

    #[tokio::test]
    async fn unresolved_ids_add_nothing() {
        let w = world().await;
        let c = criteria(json!({"states": ["nowhere"]}));
        assert!(search_places(&w.storage, &c).await.unwrap().is_empty());

        let c = criteria(json!({"amenities": ["no-such-amenity"]}));
        assert_eq!(search_places(&w.storage, &c).await.unwrap().len(), 4);
    }

    #[test]
    fn malformed_criteria_is_rejected() {
        for v in [json!({"states": "ca"}), json!({"cities": [1, 2]}), json!({"amenities": {}})] {
            let err = PlaceSearch::from_body(JsonBody(v.as_object().cloned())).unwrap_err();
            assert_eq!(err.to_string(), "Invalid search criteria");
        }
    }
}
