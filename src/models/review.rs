use super::fields::{required_str, string_value, Payload};
use super::{BaseModel, Entity, Kind, Requirement, Resource};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(flatten)]
    pub base: BaseModel,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

impl From<Review> for Entity {
    fn from(value: Review) -> Self {
        Entity::Review(value)
    }
}

impl Resource for Review {
    const KIND: Kind = Kind::Review;
    const REQUIRED: &'static [Requirement] = &[
        Requirement::Reference("user_id", Kind::User),
        Requirement::Field("text"),
    ];
    const FROZEN: &'static [&'static str] = &["user_id", "place_id"];
    const PARENT: Option<(&'static str, Kind)> = Some(("place_id", Kind::Place));

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn from_entity(entity: Entity) -> Option<Self> {
        match entity {
            Entity::Review(r) => Some(r),
            _ => None,
        }
    }

    fn from_payload(payload: &Payload) -> Result<Self, AppError> {
        Ok(Review {
            base: BaseModel::new(),
            place_id: required_str(payload, "place_id")?,
            user_id: required_str(payload, "user_id")?,
            text: required_str(payload, "text")?,
        })
    }

    fn apply(&mut self, key: &str, value: &Value) -> Result<(), AppError> {
        if key == "text" {
            self.text = string_value(key, value)?;
        }
        Ok(())
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.place_id)
    }
}
