//! Review business operations on top of the persistence gateway.

use super::review_gateway::ReviewGateway;
use super::validation::ValidationError;
use crate::models::{NewReview, Review, ReviewChanges, ReviewListResponse};
use crate::storage::{ReviewStore, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Errors surfaced by [`ReviewService`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReviewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Review not found: {id}")]
    NotFound { id: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What an accepted update did to the stored review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Modified,
    /// The review exists but the store reported no modification
    Unchanged,
}

/// Stateless review operations; the only dependency is the gateway.
#[derive(Clone)]
pub struct ReviewService {
    gateway: ReviewGateway,
}

impl ReviewService {
    pub fn new(gateway: ReviewGateway) -> Self {
        Self { gateway }
    }

    /// Build a service over `store` with a fresh gateway.
    pub fn with_store(store: Arc<dyn ReviewStore>) -> Self {
        Self::new(ReviewGateway::new(store))
    }

    pub fn gateway(&self) -> &ReviewGateway {
        &self.gateway
    }

    pub async fn list_reviews(&self) -> Result<ReviewListResponse, ReviewError> {
        let list = self.gateway.list_all().await;
        if let Some(e) = list.error {
            return Err(ReviewError::Storage(e));
        }
        debug!(total = list.total, "Listed reviews");
        Ok(ReviewListResponse {
            reviews: list.reviews,
            total: list.total,
        })
    }

    pub async fn create_review(&self, review: NewReview) -> Result<Uuid, ReviewError> {
        let id = self.gateway.create(review).await?;
        info!(%id, "Review created");
        Ok(id)
    }

    pub async fn get_review(&self, id: &str) -> Result<Review, ReviewError> {
        self.gateway
            .get_by_id(id)
            .await
            .ok_or_else(|| ReviewError::NotFound { id: id.to_string() })
    }

    pub async fn update_review(
        &self,
        id: &str,
        changes: ReviewChanges,
    ) -> Result<UpdateOutcome, ReviewError> {
        if changes.is_empty() {
            return Err(ValidationError::NoFieldsToUpdate.into());
        }

        let status = self.gateway.update(id, changes).await?;
        match (status.matched, status.success) {
            (false, _) => Err(ReviewError::NotFound { id: id.to_string() }),
            (true, true) => {
                info!(id, "Review updated");
                Ok(UpdateOutcome::Modified)
            }
            (true, false) => {
                debug!(id, "Review matched but not modified");
                Ok(UpdateOutcome::Unchanged)
            }
        }
    }

    pub async fn delete_review(&self, id: &str) -> Result<(), ReviewError> {
        let status = self.gateway.delete(id).await?;
        if !status.success {
            return Err(ReviewError::NotFound { id: id.to_string() });
        }
        info!(id, "Review deleted");
        Ok(())
    }
}
