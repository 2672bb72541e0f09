pub mod crud;
pub mod links;
pub mod search;
pub mod validation;

pub use crud::CrudService;
pub use search::{search_places, PlaceSearch};
pub use validation::RequestValidator;
