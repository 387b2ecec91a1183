//! OpenAPI specification definition.
//!
//! Aggregates the review route handlers and schemas for documentation.

use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        // Reviews
        crate::routes::reviews::list_reviews,
        crate::routes::reviews::create_review,
        crate::routes::reviews::get_review,
        crate::routes::reviews::update_review,
        crate::routes::reviews::delete_review,
    ),
    components(schemas(
        crate::models::Review,
        crate::models::Rating,
        crate::models::NewReview,
        crate::models::ReviewChanges,
        crate::models::ReviewListResponse,
        crate::models::CreateReviewResponse,
        crate::models::MessageResponse,
        crate::models::ErrorResponse,
    )),
    modifiers(&VersionAddon),
    tags(
        (name = "Reviews", description = "Pizza review CRUD"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "Pizza Reviews API",
        description = "Create, read, update and delete pizza reviews",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:5001", description = "Local development server")
    )
)]
pub struct ApiDoc;

struct VersionAddon;

impl Modify for VersionAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // Keep the documented version in step with Cargo.toml
        openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    }
}
