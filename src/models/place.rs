use super::fields::{
    float_value, int_value, optional_float, optional_int, optional_str, required_str,
    string_value, Payload,
};
use super::{BaseModel, Entity, Kind, Requirement, Resource};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(flatten)]
    pub base: BaseModel,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub number_rooms: i64,
    #[serde(default)]
    pub number_bathrooms: i64,
    #[serde(default)]
    pub max_guest: i64,
    #[serde(default)]
    pub price_by_night: i64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Linked amenities. Changed only through the place/amenity link routes.
    #[serde(default)]
    pub amenity_ids: Vec<String>,
}

impl Place {
    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.iter().any(|a| a == amenity_id)
    }
}

impl From<Place> for Entity {
    fn from(value: Place) -> Self {
        Entity::Place(value)
    }
}

impl Resource for Place {
    const KIND: Kind = Kind::Place;
    const REQUIRED: &'static [Requirement] = &[
        Requirement::Reference("user_id", Kind::User),
        Requirement::Field("name"),
    ];
    const FROZEN: &'static [&'static str] = &["user_id", "city_id", "amenity_ids"];
    const PARENT: Option<(&'static str, Kind)> = Some(("city_id", Kind::City));

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn from_entity(entity: Entity) -> Option<Self> {
        match entity {
            Entity::Place(p) => Some(p),
            _ => None,
        }
    }

    fn from_payload(payload: &Payload) -> Result<Self, AppError> {
        Ok(Place {
            base: BaseModel::new(),
            city_id: required_str(payload, "city_id")?,
            user_id: required_str(payload, "user_id")?,
            name: required_str(payload, "name")?,
            description: optional_str(payload, "description")?.unwrap_or_default(),
            number_rooms: optional_int(payload, "number_rooms")?.unwrap_or_default(),
            number_bathrooms: optional_int(payload, "number_bathrooms")?.unwrap_or_default(),
            max_guest: optional_int(payload, "max_guest")?.unwrap_or_default(),
            price_by_night: optional_int(payload, "price_by_night")?.unwrap_or_default(),
            latitude: optional_float(payload, "latitude")?.unwrap_or_default(),
            longitude: optional_float(payload, "longitude")?.unwrap_or_default(),
            amenity_ids: Vec::new(),
        })
    }

    fn apply(&mut self, key: &str, value: &Value) -> Result<(), AppError> {
        match key {
            "name" => self.name = string_value(key, value)?,
            "description" => self.description = string_value(key, value)?,
            "number_rooms" => self.number_rooms = int_value(key, value)?,
            "number_bathrooms" => self.number_bathrooms = int_value(key, value)?,
            "max_guest" => self.max_guest = int_value(key, value)?,
            "price_by_night" => self.price_by_night = int_value(key, value)?,
            "latitude" => self.latitude = float_value(key, value)?,
            "longitude" => self.longitude = float_value(key, value)?,
            _ => {}
        }
        Ok(())
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.city_id)
    }
}
