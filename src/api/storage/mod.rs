//! Storage module for the API.
//!
//! Provides the review store trait with PostgreSQL and in-memory backends.

pub mod error;
pub mod traits;

// Storage backend implementations
pub mod memory;
pub mod postgres;

pub use error::StorageError;
pub use memory::InMemoryReviewStore;
pub use postgres::PostgresReviewStore;
pub use traits::{ReviewStore, UpdateResult};
