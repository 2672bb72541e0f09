//! HTTP handlers: generic resource CRUD, and the place-specific routes.

pub mod places;
pub mod resource;

pub use places::*;
pub use resource::*;
