use super::fields::{required_str, string_value, Payload};
use super::{BaseModel, Entity, Kind, Requirement, Resource};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
}

impl From<Amenity> for Entity {
    fn from(value: Amenity) -> Self {
        Entity::Amenity(value)
    }
}

impl Resource for Amenity {
    const KIND: Kind = Kind::Amenity;
    const REQUIRED: &'static [Requirement] = &[Requirement::Field("name")];

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn from_entity(entity: Entity) -> Option<Self> {
        match entity {
            Entity::Amenity(a) => Some(a),
            _ => None,
        }
    }

    fn from_payload(payload: &Payload) -> Result<Self, AppError> {
        Ok(Amenity {
            base: BaseModel::new(),
            name: required_str(payload, "name")?,
        })
    }

    fn apply(&mut self, key: &str, value: &Value) -> Result<(), AppError> {
        if key == "name" {
            self.name = string_value(key, value)?;
        }
        Ok(())
    }
}
