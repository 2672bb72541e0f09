use super::fields::{optional_str, required_str, string_value, Payload};
use super::{BaseModel, Entity, Kind, Requirement, Resource};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: BaseModel,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl From<User> for Entity {
    fn from(value: User) -> Self {
        Entity::User(value)
    }
}

impl Resource for User {
    const KIND: Kind = Kind::User;
    const REQUIRED: &'static [Requirement] =
        &[Requirement::Field("email"), Requirement::Field("password")];
    // The login identity is fixed once the account exists.
    const FROZEN: &'static [&'static str] = &["email"];

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn from_entity(entity: Entity) -> Option<Self> {
        match entity {
            Entity::User(u) => Some(u),
            _ => None,
        }
    }

    fn from_payload(payload: &Payload) -> Result<Self, AppError> {
        Ok(User {
            base: BaseModel::new(),
            email: required_str(payload, "email")?,
            password: required_str(payload, "password")?,
            first_name: optional_str(payload, "first_name")?.unwrap_or_default(),
            last_name: optional_str(payload, "last_name")?.unwrap_or_default(),
        })
    }

    fn apply(&mut self, key: &str, value: &Value) -> Result<(), AppError> {
        match key {
            "password" => self.password = string_value(key, value)?,
            "first_name" => self.first_name = string_value(key, value)?,
            "last_name" => self.last_name = string_value(key, value)?,
            _ => {}
        }
        Ok(())
    }
}
