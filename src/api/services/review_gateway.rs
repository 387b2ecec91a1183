//! Persistence gateway for reviews.
//!
//! Turns string identifiers into store keys and converts every store fault
//! into a structured outcome. Nothing here returns a panic or an unlogged
//! error to the caller.

use crate::models::{NewReview, Review, ReviewChanges, ReviewDocument};
use crate::storage::{ReviewStore, StorageError};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

/// Result of [`ReviewGateway::list_all`].
///
/// On a storage fault `reviews` is empty and `error` carries the fault.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewList {
    pub reviews: Vec<Review>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StorageError>,
}

/// Outcome of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateStatus {
    /// At least one document was modified
    pub success: bool,
    /// A document with the id exists
    pub matched: bool,
}

/// Outcome of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteStatus {
    /// Exactly one document was removed
    pub success: bool,
}

/// Gateway over the review collection.
#[derive(Clone)]
pub struct ReviewGateway {
    store: Arc<dyn ReviewStore>,
}

impl ReviewGateway {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }

    /// Backend name of the wrapped store
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub async fn list_all(&self) -> ReviewList {
        match self.store.find_all().await {
            Ok(reviews) => ReviewList {
                total: reviews.len(),
                reviews,
                error: None,
            },
            Err(e) => {
                error!("Unable to get reviews: {}", e);
                ReviewList {
                    reviews: Vec::new(),
                    total: 0,
                    error: Some(e),
                }
            }
        }
    }

    /// Normalize and insert a review, returning the store-assigned id.
    pub async fn create(&self, review: NewReview) -> Result<Uuid, StorageError> {
        let document = ReviewDocument::new(review, Utc::now());
        self.store.insert_one(document).await.map_err(|e| {
            error!("Unable to add review: {}", e);
            e
        })
    }

    /// Malformed ids and storage faults are logged and reported as absent.
    pub async fn get_by_id(&self, id: &str) -> Option<Review> {
        let key = parse_id(id, "get")?;
        match self.store.find_one(key).await {
            Ok(review) => review,
            Err(e) => {
                error!(id = %key, "Unable to get review: {}", e);
                None
            }
        }
    }

    /// Merge `changes` and refresh `updatedAt`, even when `changes` is empty.
    pub async fn update(
        &self,
        id: &str,
        changes: ReviewChanges,
    ) -> Result<UpdateStatus, StorageError> {
        let Some(key) = parse_id(id, "update") else {
            return Ok(UpdateStatus {
                success: false,
                matched: false,
            });
        };

        let result = self
            .store
            .update_one(key, &changes, Utc::now())
            .await
            .map_err(|e| {
                error!(id = %key, "Unable to update review: {}", e);
                e
            })?;

        Ok(UpdateStatus {
            success: result.modified_count > 0,
            matched: result.matched_count > 0,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteStatus, StorageError> {
        let Some(key) = parse_id(id, "delete") else {
            return Ok(DeleteStatus { success: false });
        };

        let deleted = self.store.delete_one(key).await.map_err(|e| {
            error!(id = %key, "Unable to delete review: {}", e);
            e
        })?;

        Ok(DeleteStatus {
            success: deleted == 1,
        })
    }
}

fn parse_id(id: &str, operation: &str) -> Option<Uuid> {
    match Uuid::parse_str(id) {
        Ok(key) => Some(key),
        Err(e) => {
            warn!(id, operation, "Review id is not a valid key: {}", e);
            None
        }
    }
}
