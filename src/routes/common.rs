//! Index routes: status, object counts, version.

use crate::error::AppError;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

async fn status() -> Json<StatusBody> {
    Json(StatusBody { status: "OK" })
}

async fn stats(State(state): State<AppState>) -> Result<Json<BTreeMap<&'static str, usize>>, AppError> {
    Ok(Json(CrudService::stats(state.storage.as_ref()).await?))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /status, GET /stats, GET /version.
pub fn common_routes() -> Router<AppState> {
    let router = Router::new();
    let router = super::route_both(router, "/status", get(status));
    let router = super::route_both(router, "/stats", get(stats));
    super::route_both(router, "/version", get(version))
}
