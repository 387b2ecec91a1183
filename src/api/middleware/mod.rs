// Middleware module - contains observability, CORS and panic handling setup

pub mod cors;
pub mod observability;
pub mod panic;

// Re-export for convenience
pub use cors::{cors_layer_for, create_cors_layer, create_custom_cors_layer};
pub use observability::init_tracing;
pub use panic::create_catch_panic_layer;
