//! HBnB API: REST backend for a property-rental site (states, cities,
//! places, reviews, users, amenities) over pluggable storage.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod storage;

pub use config::{ServerConfig, StorageBackend, StorageConfig};
pub use error::{AppError, ConfigError, StorageError};
pub use models::{Amenity, City, Entity, Kind, Place, Resource, Review, State, User};
pub use response::{success_empty, success_many, success_one, success_one_ok};
pub use routes::{app, common_routes, resource_routes, API_PREFIX};
pub use service::CrudService;
pub use state::AppState;
pub use storage::{open as open_storage, FileStorage, MemoryStorage, PgStorage, Storage};
