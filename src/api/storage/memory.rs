//! In-memory storage backend.
//!
//! Used when no `DATABASE_URL` is configured and as the store behind the
//! HTTP tests.

use super::{StorageError, traits::*};
use crate::models::{Review, ReviewChanges, ReviewDocument};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Review store kept in process memory, in insertion order.
#[derive(Default)]
pub struct InMemoryReviewStore {
    reviews: RwLock<Vec<Review>>,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self) -> Result<Vec<Review>, StorageError> {
        Ok(self.reviews.read().await.clone())
    }

    async fn insert_one(&self, document: ReviewDocument) -> Result<Uuid, StorageError> {
        let mut reviews = self.reviews.write().await;
        let mut id = Uuid::new_v4();
        while reviews.iter().any(|r| r.id == id) {
            id = Uuid::new_v4();
        }
        reviews.push(Review::from_document(id, document));
        Ok(id)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Review>, StorageError> {
        Ok(self.reviews.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn update_one(
        &self,
        id: Uuid,
        changes: &ReviewChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateResult, StorageError> {
        let mut reviews = self.reviews.write().await;
        let Some(review) = reviews.iter_mut().find(|r| r.id == id) else {
            return Ok(UpdateResult::default());
        };

        let fields_changed = review.apply(changes);
        debug!(%id, fields_changed, "Applied review changes in memory");
        review.updated_at = if updated_at > review.updated_at {
            updated_at
        } else {
            review.updated_at + Duration::microseconds(1)
        };

        // updated_at always moves, so a matched document is always modified
        Ok(UpdateResult {
            matched_count: 1,
            modified_count: 1,
        })
    }

    async fn delete_one(&self, id: Uuid) -> Result<u64, StorageError> {
        let mut reviews = self.reviews.write().await;
        match reviews.iter().position(|r| r.id == id) {
            Some(index) => {
                reviews.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
