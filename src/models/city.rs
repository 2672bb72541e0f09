use super::fields::{required_str, string_value, Payload};
use super::{BaseModel, Entity, Kind, Requirement, Resource};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub base: BaseModel,
    pub state_id: String,
    pub name: String,
}

impl From<City> for Entity {
    fn from(value: City) -> Self {
        Entity::City(value)
    }
}

impl Resource for City {
    const KIND: Kind = Kind::City;
    const REQUIRED: &'static [Requirement] = &[Requirement::Field("name")];
    const FROZEN: &'static [&'static str] = &["state_id"];
    const PARENT: Option<(&'static str, Kind)> = Some(("state_id", Kind::State));

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn from_entity(entity: Entity) -> Option<Self> {
        match entity {
            Entity::City(c) => Some(c),
            _ => None,
        }
    }

    fn from_payload(payload: &Payload) -> Result<Self, AppError> {
        Ok(City {
            base: BaseModel::new(),
            state_id: required_str(payload, "state_id")?,
            name: required_str(payload, "name")?,
        })
    }

    fn apply(&mut self, key: &str, value: &Value) -> Result<(), AppError> {
        if key == "name" {
            self.name = string_value(key, value)?;
        }
        Ok(())
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.state_id)
    }
}
