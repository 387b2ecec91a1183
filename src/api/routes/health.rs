//! Health check route.

use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use super::app_state::AppState;

/// GET /health - Liveness plus the active storage backend
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = Object)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "pizza-reviews-api",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": state.storage_backend(),
    }))
}
