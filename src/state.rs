//! Shared application state for all routes.

use crate::storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Injected at router construction; every handler goes through it.
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        AppState { storage }
    }
}
