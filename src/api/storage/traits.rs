//! Storage trait definitions for the review store backends.

use crate::models::{Review, ReviewChanges, ReviewDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Acknowledgment of an `update_one` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    /// Documents that matched the id
    pub matched_count: u64,
    /// Documents whose stored content actually changed
    pub modified_count: u64,
}

/// Document store holding one collection of reviews.
///
/// Every method is a single-document (or full-scan) operation; backends must
/// make each one atomic on its own.
#[async_trait::async_trait]
pub trait ReviewStore: Send + Sync {
    /// Short backend name reported by the health check
    fn backend_name(&self) -> &'static str;

    /// Return every stored review in insertion order
    async fn find_all(&self) -> Result<Vec<Review>, super::StorageError>;

    /// Insert a document and return the id the store assigned to it
    async fn insert_one(&self, document: ReviewDocument) -> Result<Uuid, super::StorageError>;

    /// Look up a single review by id
    async fn find_one(&self, id: Uuid) -> Result<Option<Review>, super::StorageError>;

    /// Merge `changes` into the review and set its `updated_at`.
    ///
    /// `updated_at` must end up strictly greater than its previous value, even
    /// when the supplied instant is not.
    async fn update_one(
        &self,
        id: Uuid,
        changes: &ReviewChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateResult, super::StorageError>;

    /// Remove a review; returns the number of documents deleted
    async fn delete_one(&self, id: Uuid) -> Result<u64, super::StorageError>;
}
