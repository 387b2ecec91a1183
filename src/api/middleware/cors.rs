//! CORS middleware configuration.

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Create a CORS layer with permissive settings for development.
///
/// This allows all origins, methods, and headers.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Create a CORS layer restricted to `allowed_origins`.
///
/// Origins that are not valid header values are skipped with a warning.
/// Methods and headers stay unrestricted.
pub fn create_custom_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Pick the CORS layer for a configured origin list; empty means permissive.
pub fn cors_layer_for(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        create_cors_layer()
    } else {
        create_custom_cors_layer(allowed_origins)
    }
}
