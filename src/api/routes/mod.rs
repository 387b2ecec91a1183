//! API routes module - organizes all route handlers.
//!
//! Review CRUD lives under `/api/v1/reviews`; health checks are served both
//! at `/health` and `/api/v1/health`.

pub mod app_state;
pub mod error;
pub mod health;
pub mod openapi;
pub mod reviews;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use app_state::AppState;
pub use error::{ApiError, ReviewOperation};

use crate::config::ServerConfig;
use crate::middleware::create_catch_panic_layer;
use crate::storage::StorageError;

/// Create the API router, meant to be nested under `/api/v1`.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(reviews::reviews_router())
        // OpenAPI documentation endpoints
        .merge(openapi::openapi_router())
}

/// Build the full application: root health check, `/api/v1` routes, request
/// tracing, CORS and panic recovery.
pub fn create_app(app_state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", create_api_router())
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(create_catch_panic_layer()),
        )
}

/// Create application state over an in-memory store.
pub fn create_app_state() -> AppState {
    AppState::in_memory()
}

/// Create application state with storage chosen from configuration (async).
///
/// This is the preferred method for production use.
pub async fn create_app_state_with_storage(
    config: &ServerConfig,
) -> Result<AppState, StorageError> {
    AppState::from_config(config).await
}
