//! Router assembly. Everything is mounted under `/api/v1`.

pub mod common;
pub mod resources;

pub use common::common_routes;
pub use resources::resource_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::routing::MethodRouter;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api/v1";
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Register `path` and `path/` with the same handlers.
pub(crate) fn route_both(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{}/", path), method_router)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// The full application router over the given state.
pub fn app(state: AppState) -> Router {
    let api = common_routes().merge(resource_routes());
    Router::new()
        .nest(API_PREFIX, api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
