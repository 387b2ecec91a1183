//! Services module - review business logic and its persistence gateway.

pub mod review_gateway;
pub mod review_service;
pub mod validation;

// Re-export for convenience
pub use review_gateway::{DeleteStatus, ReviewGateway, ReviewList, UpdateStatus};
pub use review_service::{ReviewError, ReviewService, UpdateOutcome};
pub use validation::{ValidationError, parse_new_review, parse_review_changes};
