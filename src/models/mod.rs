//! Entity model: the six resource types, their shared identity, and the
//! `Resource` trait the generic handlers are written against.

pub mod amenity;
pub mod base;
pub mod city;
pub mod fields;
pub mod place;
pub mod review;
pub mod state;
pub mod user;

pub use amenity::Amenity;
pub use base::{BaseModel, TIME_FORMAT};
pub use city::City;
pub use fields::Payload;
pub use place::Place;
pub use review::Review;
pub use state::State;
pub use user::User;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Entity type tag. Storage is keyed by kind + id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Amenity,
        Kind::City,
        Kind::Place,
        Kind::Review,
        Kind::State,
        Kind::User,
    ];

    /// Class name as written in `__class__` and in storage keys.
    pub fn class_name(self) -> &'static str {
        match self {
            Kind::Amenity => "Amenity",
            Kind::City => "City",
            Kind::Place => "Place",
            Kind::Review => "Review",
            Kind::State => "State",
            Kind::User => "User",
        }
    }

    /// Collection path segment, e.g. "amenities".
    pub fn collection(self) -> &'static str {
        match self {
            Kind::Amenity => "amenities",
            Kind::City => "cities",
            Kind::Place => "places",
            Kind::Review => "reviews",
            Kind::State => "states",
            Kind::User => "users",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Any stored object. Serializes flat with a `__class__` tag, which is also the wire form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Entity {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Entity {
    pub fn kind(&self) -> Kind {
        match self {
            Entity::Amenity(_) => Kind::Amenity,
            Entity::City(_) => Kind::City,
            Entity::Place(_) => Kind::Place,
            Entity::Review(_) => Kind::Review,
            Entity::State(_) => Kind::State,
            Entity::User(_) => Kind::User,
        }
    }

    pub fn base(&self) -> &BaseModel {
        match self {
            Entity::Amenity(e) => &e.base,
            Entity::City(e) => &e.base,
            Entity::Place(e) => &e.base,
            Entity::Review(e) => &e.base,
            Entity::State(e) => &e.base,
            Entity::User(e) => &e.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    /// `<Class>.<id>`, the key used by the memory and file backends.
    pub fn storage_key(&self) -> String {
        storage_key(self.kind(), self.id())
    }
}

pub fn storage_key(kind: Kind, id: &str) -> String {
    format!("{}.{}", kind.class_name(), id)
}

/// A required creation field. `Reference` must also name an existing entity of the given kind.
#[derive(Clone, Copy, Debug)]
pub enum Requirement {
    Field(&'static str),
    Reference(&'static str, Kind),
}

/// Contract every resource type implements for the generic handlers.
pub trait Resource: Clone + Send + Sync + Into<Entity> + 'static {
    const KIND: Kind;
    /// Checked in order on create.
    const REQUIRED: &'static [Requirement];
    /// Relationship keys an update never moves.
    const FROZEN: &'static [&'static str] = &[];
    /// Field filled from the parent id in nested routes, and the parent's kind.
    const PARENT: Option<(&'static str, Kind)> = None;

    fn base(&self) -> &BaseModel;

    fn base_mut(&mut self) -> &mut BaseModel;

    fn from_entity(entity: Entity) -> Option<Self>;

    /// Build a new entity from a creation payload. Unknown keys are ignored.
    fn from_payload(payload: &Payload) -> Result<Self, AppError>;

    /// Apply one updatable field. Unknown keys are ignored.
    fn apply(&mut self, key: &str, value: &Value) -> Result<(), AppError>;

    fn parent_id(&self) -> Option<&str> {
        None
    }

    fn id(&self) -> &str {
        &self.base().id
    }

    fn into_entity(self) -> Entity {
        self.into()
    }

    /// Typed merge of an update payload. Stops at the first invalid field, so
    /// callers merge into a copy and persist only on success.
    fn merge(&mut self, payload: &Payload) -> Result<(), AppError> {
        for (key, value) in fields::updatable(payload, Self::FROZEN) {
            self.apply(key, value)?;
        }
        Ok(())
    }
}
