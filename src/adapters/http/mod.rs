//! HTTP adapters - REST API over axum.

pub mod complaint;
pub mod middleware;
pub mod technician;

pub use complaint::{complaint_routes, ComplaintAppState};
pub use middleware::{auth_middleware, AuthState};
pub use technician::technician_routes;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::json;

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// The full API: `/health` plus the authenticated `/api` tree.
pub fn api_router(state: ComplaintAppState, validator: AuthState) -> Router {
    let api = Router::new()
        .nest("/complaints", complaint_routes())
        .nest("/technician", technician_routes())
        .layer(from_fn_with_state(validator, auth_middleware))
        .with_state(state);

    Router::new().route("/health", get(health)).nest("/api", api)
}
